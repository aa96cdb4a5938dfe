use crate::catalog;
use crate::domain::{HistoryEntry, Task, TaskStatus, TaskUpdate, Unit};
use crate::error::{Result, StudyError};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Owns every task record and the active-unit selection.
///
/// Tasks are kept newest-first: units created later are prepended.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    active_unit: Option<Unit>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            active_unit: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StudyError::TaskNotFound(id))
    }

    pub fn active_unit(&self) -> Option<Unit> {
        self.active_unit
    }

    /// Select a unit for display; `None` goes back to the summary
    pub fn select_unit(&mut self, unit: Option<Unit>) {
        self.active_unit = unit;
    }

    /// Distinct units, highest round first
    pub fn units(&self) -> Vec<Unit> {
        let mut units: Vec<Unit> = self.tasks.iter().map(Task::unit).collect();
        units.sort_unstable_by(|a, b| b.cmp(a));
        units.dedup();
        units
    }

    /// Tasks belonging to a unit, in store order
    pub fn unit_tasks(&self, unit: Unit) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.unit() == unit).collect()
    }

    /// Expand the preset catalog into a new unit dated today
    pub fn create_unit(&mut self, round: i64) -> Result<Unit> {
        self.create_unit_on(round, Local::now().date_naive())
    }

    /// Expand the preset catalog into a new unit.
    ///
    /// The new tasks are prepended and the unit becomes the active one.
    /// A round that is not a positive integer leaves the store untouched.
    pub fn create_unit_on(&mut self, round: i64, today: NaiveDate) -> Result<Unit> {
        let unit = u32::try_from(round)
            .ok()
            .and_then(Unit::new)
            .ok_or(StudyError::InvalidRound(round))?;

        let mut new_tasks: Vec<Task> = catalog::entries()
            .map(|(subject, category, item)| Task::new(unit, subject, category, item, today))
            .collect();
        let created = new_tasks.len();

        new_tasks.append(&mut self.tasks);
        self.tasks = new_tasks;
        self.active_unit = Some(unit);

        tracing::info!(%unit, tasks = created, "unit created");
        Ok(unit)
    }

    /// Apply a typed update to one task; returns whether it changed anything
    pub fn update_task(&mut self, id: Uuid, update: TaskUpdate) -> Result<bool> {
        let task = self.get_mut(id)?;
        Ok(task.apply(update))
    }

    /// Advance status: not_started → in_progress → completed → not_started
    pub fn cycle_status(&mut self, id: Uuid) -> Result<TaskStatus> {
        let task = self.get_mut(id)?;
        let next = task.status().next();
        task.apply(TaskUpdate::SetStatus(next));
        tracing::debug!(task = %id, status = next.to_tag(), "status cycled");
        Ok(next)
    }

    /// Commit the current session to history, dated today
    pub fn save_history(&mut self, id: Uuid) -> Result<Option<HistoryEntry>> {
        self.save_history_on(id, Local::now().date_naive())
    }

    /// Commit the current session to history.
    ///
    /// Returns `Ok(None)` when the session is empty; nothing is recorded.
    pub fn save_history_on(&mut self, id: Uuid, date: NaiveDate) -> Result<Option<HistoryEntry>> {
        let task = self.get_mut(id)?;
        let entry = task.commit_session(date);
        match &entry {
            Some(entry) => {
                tracing::info!(task = %id, seconds = entry.duration, "history saved");
            }
            None => tracing::debug!(task = %id, "empty session, nothing to save"),
        }
        Ok(entry)
    }

    /// Remove one task
    pub fn delete_task(&mut self, id: Uuid) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or(StudyError::TaskNotFound(id))?;
        let removed = self.tasks.remove(index);
        tracing::info!(task = %id, title = removed.title(), "task deleted");
        Ok(removed)
    }

    /// Remove every task of a unit; returns the removed tasks
    pub fn delete_unit(&mut self, unit: Unit) -> Vec<Task> {
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.unit() == unit);
        self.tasks = kept;

        if self.active_unit == Some(unit) {
            self.active_unit = None;
        }

        tracing::info!(%unit, tasks = removed.len(), "unit deleted");
        removed
    }
}
