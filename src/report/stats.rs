use crate::domain::{ChartKey, Subject, Task, TestResult, Unit};
use crate::store::TaskStore;

/// Progress and time for a set of tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Share of completed tasks, 0–100
    pub progress_percent: u8,
    /// Committed history plus current sessions, in seconds
    pub total_time_seconds: u64,
}

/// Overall and per-subject stats for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    pub unit: Unit,
    pub task_count: usize,
    pub overall: Stats,
    pub by_subject: Vec<(Subject, Stats)>,
}

/// Deviation-score figures for one chart series
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationSummary {
    pub key: ChartKey,
    pub count: usize,
    pub average: f64,
    pub best: f64,
    /// Deviation of the most recent test
    pub latest: f64,
}

/// Compute progress and time for a set of tasks.
///
/// With a subject filter only that subject's tasks count. Progress rounds
/// half up and is 0 for an empty set.
pub fn compute_stats<'a, I>(tasks: I, subject: Option<Subject>) -> Stats
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut total = 0u64;
    let mut completed = 0u64;
    let mut total_time_seconds = 0u64;

    for task in tasks {
        if subject.is_some_and(|s| task.subject() != s) {
            continue;
        }
        total += 1;
        if task.is_completed() {
            completed += 1;
        }
        total_time_seconds = total_time_seconds.saturating_add(task.total_time());
    }

    let progress_percent = if total == 0 {
        0
    } else {
        // round(100 * c / n) without floating point: floor((200c + n) / 2n)
        ((200 * completed + total) / (2 * total)) as u8
    };

    Stats {
        progress_percent,
        total_time_seconds,
    }
}

/// Stats for every task of one unit
pub fn unit_stats(store: &TaskStore, unit: Unit, subject: Option<Subject>) -> Stats {
    compute_stats(store.unit_tasks(unit), subject)
}

/// Summary row for every unit, highest round first
pub fn unit_summaries(store: &TaskStore) -> Vec<UnitSummary> {
    store
        .units()
        .into_iter()
        .map(|unit| {
            let tasks = store.unit_tasks(unit);
            UnitSummary {
                unit,
                task_count: tasks.len(),
                overall: compute_stats(tasks.iter().copied(), None),
                by_subject: Subject::all()
                    .iter()
                    .map(|&subject| (subject, compute_stats(tasks.iter().copied(), Some(subject))))
                    .collect(),
            }
        })
        .collect()
}

/// Deviation figures for one series over a set of results
pub fn deviation_summary(results: &[&TestResult], key: ChartKey) -> Option<DeviationSummary> {
    let latest = results.iter().max_by_key(|r| r.date)?;
    let values: Vec<f64> = results.iter().map(|r| r.deviation(key)).collect();
    let sum: f64 = values.iter().sum();
    let best = values.iter().copied().fold(f64::MIN, f64::max);

    Some(DeviationSummary {
        key,
        count: values.len(),
        average: sum / values.len() as f64,
        best,
        latest: latest.deviation(key),
    })
}
