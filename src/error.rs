use thiserror::Error;
use uuid::Uuid;

/// Recoverable signals raised by the stores.
///
/// Every operation that returns one of these leaves the store exactly as it
/// was before the call, so callers are free to log and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    #[error("round number must be a positive integer, got {0}")]
    InvalidRound(i64),

    #[error("not a number of minutes: {0:?}")]
    InvalidMinutes(String),

    #[error("{input:?} minutes is more than the {max} allowed")]
    MinutesOutOfRange { input: String, max: u64 },

    #[error("task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("a test with id {0:?} already exists")]
    DuplicateTestId(String),

    #[error("invalid date {0:?} (expected YYYY/MM/DD or YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("unknown subject: {0:?}")]
    UnknownSubject(String),

    #[error("unknown test type: {0:?}")]
    UnknownTestType(String),

    #[error("unknown chart key: {0:?}")]
    UnknownChartKey(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;
