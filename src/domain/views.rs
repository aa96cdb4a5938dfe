use super::enums::{Subject, TaskStatus};
use super::task::{Task, Unit};

/// Tasks of one category, in the order they appear in the store
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// A row of the flattened study list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyRow<'a> {
    Subject(Subject),
    Category(&'a str),
    Task(&'a Task),
}

/// Group one subject's tasks by category, categories in first-seen order
pub fn group_by_category<'a>(tasks: &[&'a Task]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for &task in tasks {
        match groups.iter_mut().find(|g| g.category == task.category()) {
            Some(group) => group.tasks.push(task),
            None => groups.push(CategoryGroup {
                category: task.category(),
                tasks: vec![task],
            }),
        }
    }

    groups
}

/// Flatten a unit's tasks into subject → category → task rows for rendering.
/// Subjects without tasks are skipped.
pub fn flatten_unit<'a>(tasks: &'a [Task], unit: Unit) -> Vec<StudyRow<'a>> {
    let mut rows = Vec::new();

    for subject in Subject::all() {
        let subject_tasks: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.unit() == unit && t.subject() == *subject)
            .collect();
        if subject_tasks.is_empty() {
            continue;
        }

        rows.push(StudyRow::Subject(*subject));
        for group in group_by_category(&subject_tasks) {
            rows.push(StudyRow::Category(group.category));
            rows.extend(group.tasks.into_iter().map(StudyRow::Task));
        }
    }

    rows
}

/// Status badge text
pub fn status_badge(status: TaskStatus, use_emoji: bool) -> &'static str {
    match (status, use_emoji) {
        (TaskStatus::NotStarted, true) => "○",
        (TaskStatus::InProgress, true) => "⚡",
        (TaskStatus::Completed, true) => "✓",
        (TaskStatus::NotStarted, false) => "[ ]",
        (TaskStatus::InProgress, false) => "[~]",
        (TaskStatus::Completed, false) => "[x]",
    }
}

/// Text progress bar, e.g. `[#####-----]` for 50%
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
