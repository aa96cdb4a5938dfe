//! Study progress tracking: a curriculum task checklist with per-task
//! stopwatches, progress roll-ups, and a standardized test score log.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod seed;
pub mod stopwatch;
pub mod store;
pub mod tracker;

pub use error::{Result, StudyError};
pub use tracker::{PendingDelete, Tracker};
