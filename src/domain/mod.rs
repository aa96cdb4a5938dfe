pub mod enums;
pub mod task;
pub mod test_result;
pub mod time_format;
pub mod views;

pub use enums::{ChartKey, SortOrder, Subject, TaskStatus, TestType};
pub use task::{HistoryEntry, Task, TaskUpdate, Unit};
pub use test_result::{format_score, ScoreLine, SubjectScores, TestResult};
pub use time_format::{
    format_date_range, format_time, month_day, parse_date, parse_date_range, parse_minutes, MAX_MINUTES,
};
pub use views::{flatten_unit, group_by_category, progress_bar, status_badge, CategoryGroup, StudyRow};
