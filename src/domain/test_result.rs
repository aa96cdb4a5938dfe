use super::enums::{ChartKey, Subject, TestType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Figures reported for one subject (or the four-subject total)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreLine {
    pub score: f64,
    /// Cohort average
    pub average: f64,
    /// Cohort-normalized score, mean 50
    pub deviation_score: f64,
    /// Free text such as "1665/2216"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

impl ScoreLine {
    pub fn new(score: f64, average: f64, deviation_score: f64) -> Self {
        Self {
            score,
            average,
            deviation_score,
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }
}

/// Per-subject figures, one line for each of the four subjects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubjectScores {
    pub math: ScoreLine,
    pub japanese: ScoreLine,
    pub science: ScoreLine,
    pub social: ScoreLine,
}

impl SubjectScores {
    pub fn get(&self, subject: Subject) -> &ScoreLine {
        match subject {
            Subject::Math => &self.math,
            Subject::Japanese => &self.japanese,
            Subject::Science => &self.science,
            Subject::Social => &self.social,
        }
    }
}

/// One administered exam. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub subjects: SubjectScores,
    /// Four-subject aggregate as published, not recomputed from `subjects`
    pub total4: ScoreLine,
}

impl TestResult {
    /// Figures behind a chart series: one subject or the four-subject total
    pub fn line(&self, key: ChartKey) -> &ScoreLine {
        match key.subject() {
            Some(subject) => self.subjects.get(subject),
            None => &self.total4,
        }
    }

    /// Deviation score for a chart series
    pub fn deviation(&self, key: ChartKey) -> f64 {
        self.line(key).deviation_score
    }
}

/// Raw scores and averages: whole numbers print bare, others with one decimal
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
