use super::enums::{Subject, TaskStatus};
use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

/// A numbered curriculum round ("第14回")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Unit {
    round: u32,
}

impl Unit {
    /// Build a unit from a round number; zero is not a round
    pub fn new(round: u32) -> Option<Self> {
        (round > 0).then_some(Self { round })
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Parse a unit label like "第14回". A bare number is accepted too.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let inner = trimmed
            .strip_prefix('第')
            .and_then(|rest| rest.strip_suffix('回'))
            .unwrap_or(trimmed);
        inner.trim().parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "第{}回", self.round)
    }
}

/// One committed study session. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Session length in seconds, always > 0
    pub duration: u64,
    pub memo: String,
}

/// The closed set of edits callers may make to a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    SetStatus(TaskStatus),
    /// Overwrite the current session's elapsed seconds
    SetDuration(u64),
    SetMemo(String),
}

/// A single item of study work within a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: Uuid,
    unit: Unit,
    subject: Subject,
    category: String,
    title: String,
    status: TaskStatus,
    current_duration: u64,
    current_memo: String,
    history: Vec<HistoryEntry>,
    created_at: NaiveDate,
}

impl Task {
    pub fn new(
        unit: Unit,
        subject: Subject,
        category: impl Into<String>,
        title: impl Into<String>,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit,
            subject,
            category: category.into(),
            title: title.into(),
            status: TaskStatus::NotStarted,
            current_duration: 0,
            current_memo: String::new(),
            history: Vec::new(),
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// "予習シリーズ - 基本問題"
    pub fn material_name(&self) -> String {
        format!("{} - {}", self.category, self.title)
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn current_duration(&self) -> u64 {
        self.current_duration
    }

    pub fn current_memo(&self) -> &str {
        &self.current_memo
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Seconds already committed to history
    pub fn history_total(&self) -> u64 {
        self.history
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.duration))
    }

    /// Committed time plus the running session
    pub fn total_time(&self) -> u64 {
        self.history_total().saturating_add(self.current_duration)
    }

    /// Apply an update; returns whether anything changed
    pub fn apply(&mut self, update: TaskUpdate) -> bool {
        match update {
            TaskUpdate::SetStatus(status) => {
                let changed = self.status != status;
                self.status = status;
                changed
            }
            TaskUpdate::SetDuration(seconds) => {
                let changed = self.current_duration != seconds;
                self.current_duration = seconds;
                changed
            }
            TaskUpdate::SetMemo(memo) => {
                let changed = self.current_memo != memo;
                self.current_memo = memo;
                changed
            }
        }
    }

    /// Move the current session into history.
    ///
    /// Nothing happens for an empty session. Otherwise the whole duration and
    /// memo move into a new tail entry and both fields are reset in the same
    /// step.
    pub(crate) fn commit_session(&mut self, date: NaiveDate) -> Option<HistoryEntry> {
        if self.current_duration == 0 {
            return None;
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            date,
            duration: std::mem::take(&mut self.current_duration),
            memo: std::mem::take(&mut self.current_memo),
        };
        self.history.push(entry.clone());
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_task() -> Task {
        Task::new(Unit::new(14).unwrap(), Subject::Math, "計算", "①", date(2025, 5, 18))
    }

    #[test]
    fn test_unit_label_round_trip() {
        let unit = Unit::new(14).unwrap();
        assert_eq!(unit.to_string(), "第14回");
        assert_eq!(Unit::parse("第14回"), Some(unit));
        assert_eq!(Unit::parse("14"), Some(unit));
        assert_eq!(Unit::parse("第0回"), None);
        assert_eq!(Unit::parse("round"), None);
        assert_eq!(Unit::new(0), None);
    }

    #[test]
    fn test_units_order_by_round() {
        let mut units = vec![Unit::new(3).unwrap(), Unit::new(12).unwrap(), Unit::new(7).unwrap()];
        units.sort_by(|a, b| b.cmp(a));
        let rounds: Vec<u32> = units.iter().map(Unit::round).collect();
        assert_eq!(rounds, vec![12, 7, 3]);
    }

    #[test]
    fn test_task_new() {
        let task = create_test_task();
        assert_eq!(task.status(), TaskStatus::NotStarted);
        assert_eq!(task.current_duration(), 0);
        assert!(task.current_memo().is_empty());
        assert!(task.history().is_empty());
        assert_eq!(task.material_name(), "計算 - ①");
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut task = create_test_task();
        assert!(task.apply(TaskUpdate::SetDuration(30)));
        assert!(!task.apply(TaskUpdate::SetDuration(30)));
        assert!(task.apply(TaskUpdate::SetMemo("問3".to_string())));
        assert!(task.apply(TaskUpdate::SetStatus(TaskStatus::Completed)));
        assert_eq!(task.current_duration(), 30);
        assert_eq!(task.current_memo(), "問3");
        assert!(task.is_completed());
    }

    #[test]
    fn test_commit_session_conserves_time() {
        let mut task = create_test_task();
        task.apply(TaskUpdate::SetDuration(900));
        task.apply(TaskUpdate::SetMemo("全問正解！".to_string()));
        task.commit_session(date(2025, 5, 18));
        task.apply(TaskUpdate::SetDuration(125));

        let before = task.total_time();
        let entry = task.commit_session(date(2025, 5, 19)).unwrap();

        assert_eq!(task.total_time(), before);
        assert_eq!(entry.duration, 125);
        assert_eq!(task.current_duration(), 0);
        assert!(task.current_memo().is_empty());
        assert_eq!(task.history().len(), 2);
        assert_eq!(task.history()[0].memo, "全問正解！");
        assert_eq!(task.history().last(), Some(&entry));
    }

    #[test]
    fn test_total_time_saturates() {
        let mut task = create_test_task();
        task.apply(TaskUpdate::SetDuration(u64::MAX));
        task.commit_session(date(2025, 5, 18));
        task.apply(TaskUpdate::SetDuration(60));

        assert_eq!(task.history_total(), u64::MAX);
        assert_eq!(task.total_time(), u64::MAX);
    }

    #[test]
    fn test_commit_empty_session_is_noop() {
        let mut task = create_test_task();
        task.apply(TaskUpdate::SetMemo("memo only".to_string()));
        assert_eq!(task.commit_session(date(2025, 5, 18)), None);
        assert!(task.history().is_empty());
        assert_eq!(task.current_memo(), "memo only");
    }
}
