use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};

/// One of the four exam subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Japanese,
    Science,
    Social,
}

impl Subject {
    /// All subjects in display order
    pub fn all() -> &'static [Subject] {
        &[Subject::Math, Subject::Japanese, Subject::Science, Subject::Social]
    }

    /// Parse from the identifier used on the command line and in settings
    pub fn from_key(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "math" => Ok(Self::Math),
            "japanese" => Ok(Self::Japanese),
            "science" => Ok(Self::Science),
            "social" => Ok(Self::Social),
            _ => Err(StudyError::UnknownSubject(key.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Japanese => "japanese",
            Self::Science => "science",
            Self::Social => "social",
        }
    }

    /// Full subject name as printed on report cards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Math => "算数",
            Self::Japanese => "国語",
            Self::Science => "理科",
            Self::Social => "社会",
        }
    }

    /// Single-glyph abbreviation
    pub fn short(&self) -> &'static str {
        match self {
            Self::Math => "算",
            Self::Japanese => "国",
            Self::Science => "理",
            Self::Social => "社",
        }
    }
}

/// Completion status of a study task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Next status in the not_started → in_progress → completed cycle
    pub fn next(&self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::NotStarted,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "未着手",
            Self::InProgress => "勉強中",
            Self::Completed => "完了",
        }
    }
}

/// Kind of standardized test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Curriculum test covering the last few rounds
    Curriculum,
    /// Placement test that decides the class group
    Kumiwake,
    /// School-judgment test
    Hantei,
}

impl TestType {
    pub fn all() -> &'static [TestType] {
        &[TestType::Curriculum, TestType::Kumiwake, TestType::Hantei]
    }

    /// Parse a type filter; `"all"` (or an empty string) means no filter
    pub fn parse_filter(key: &str) -> Result<Option<Self>> {
        match key.trim().to_lowercase().as_str() {
            "" | "all" => Ok(None),
            "curriculum" => Ok(Some(Self::Curriculum)),
            "kumiwake" => Ok(Some(Self::Kumiwake)),
            "hantei" => Ok(Some(Self::Hantei)),
            _ => Err(StudyError::UnknownTestType(key.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Curriculum => "curriculum",
            Self::Kumiwake => "kumiwake",
            Self::Hantei => "hantei",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Curriculum => "カリテ",
            Self::Kumiwake => "組分け",
            Self::Hantei => "判定",
        }
    }
}

/// A series that can be plotted on the deviation chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartKey {
    /// Four-subject total
    #[serde(rename = "4ko")]
    Total,
    #[serde(rename = "math")]
    Math,
    #[serde(rename = "japanese")]
    Japanese,
    #[serde(rename = "science")]
    Science,
    #[serde(rename = "social")]
    Social,
}

impl ChartKey {
    pub fn all() -> &'static [ChartKey] {
        &[
            ChartKey::Total,
            ChartKey::Math,
            ChartKey::Japanese,
            ChartKey::Science,
            ChartKey::Social,
        ]
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "4ko" | "total" => Ok(Self::Total),
            other => Subject::from_key(other)
                .map(Self::from)
                .map_err(|_| StudyError::UnknownChartKey(key.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Total => "4ko",
            Self::Math => "math",
            Self::Japanese => "japanese",
            Self::Science => "science",
            Self::Social => "social",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Total => "4科",
            Self::Math => Subject::Math.label(),
            Self::Japanese => Subject::Japanese.label(),
            Self::Science => Subject::Science.label(),
            Self::Social => Subject::Social.label(),
        }
    }

    /// The subject behind this series, `None` for the four-subject total
    pub fn subject(&self) -> Option<Subject> {
        match self {
            Self::Total => None,
            Self::Math => Some(Subject::Math),
            Self::Japanese => Some(Subject::Japanese),
            Self::Science => Some(Subject::Science),
            Self::Social => Some(Subject::Social),
        }
    }
}

impl From<Subject> for ChartKey {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Math => Self::Math,
            Subject::Japanese => Self::Japanese,
            Subject::Science => Self::Science,
            Subject::Social => Self::Social,
        }
    }
}

/// Direction for chronological sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle_closes_after_three_steps() {
        for start in [TaskStatus::NotStarted, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(start.next().next().next(), start);
        }
        assert_eq!(TaskStatus::NotStarted.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.next(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::NotStarted);
    }

    #[test]
    fn test_subject_from_key() {
        assert_eq!(Subject::from_key("math"), Ok(Subject::Math));
        assert_eq!(Subject::from_key(" Social "), Ok(Subject::Social));
        assert!(Subject::from_key("english").is_err());
    }

    #[test]
    fn test_test_type_filter() {
        assert_eq!(TestType::parse_filter("all"), Ok(None));
        assert_eq!(TestType::parse_filter(""), Ok(None));
        assert_eq!(TestType::parse_filter("kumiwake"), Ok(Some(TestType::Kumiwake)));
        assert_eq!(
            TestType::parse_filter("mock"),
            Err(StudyError::UnknownTestType("mock".to_string()))
        );
    }

    #[test]
    fn test_chart_key_parsing() {
        assert_eq!(ChartKey::from_key("4ko"), Ok(ChartKey::Total));
        assert_eq!(ChartKey::from_key("science"), Ok(ChartKey::Science));
        assert_eq!(ChartKey::Science.subject(), Some(Subject::Science));
        assert_eq!(ChartKey::Total.subject(), None);
        assert!(ChartKey::from_key("5ko").is_err());
    }

    #[test]
    fn test_chart_key_serializes_as_original_keys() {
        assert_eq!(serde_json::to_string(&ChartKey::Total).unwrap(), "\"4ko\"");
        assert_eq!(serde_json::to_string(&ChartKey::Math).unwrap(), "\"math\"");
    }
}
