use crate::domain::{parse_minutes, HistoryEntry, MAX_MINUTES, Task, TaskStatus, TaskUpdate, Unit};
use crate::error::{Result, StudyError};
use crate::stopwatch::{Clock, StopwatchRegistry, StopwatchSnapshot, SystemClock};
use crate::store::TaskStore;
use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// A destructive operation waiting for the user's confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Task(Uuid),
    Unit(Unit),
}

/// Task store plus the stopwatches that write into it.
///
/// All stopwatch ticks reach the store through [`Tracker::poll`], and every
/// other mutation re-syncs idle stopwatches afterwards, so the store stays
/// the single record of `current_duration`.
#[derive(Debug)]
pub struct Tracker<C: Clock = SystemClock> {
    store: TaskStore,
    watches: StopwatchRegistry<C>,
    pending_delete: Option<PendingDelete>,
}

impl<C: Clock> Tracker<C> {
    pub fn new(store: TaskStore, clock: C) -> Self {
        Self {
            store,
            watches: StopwatchRegistry::new(clock),
            pending_delete: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn clock(&self) -> &C {
        self.watches.clock()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.store.get(id)
    }

    fn require(&self, id: Uuid) -> Result<&Task> {
        self.store.get(id).ok_or(StudyError::TaskNotFound(id))
    }

    /// Re-baseline an idle stopwatch from the store
    fn sync(&mut self, id: Uuid) {
        if let Some(task) = self.store.get(id) {
            self.watches.adopt(id, task.current_duration());
        }
    }

    pub fn snapshot(&self, id: Uuid) -> StopwatchSnapshot {
        let baseline = self.store.get(id).map(Task::current_duration).unwrap_or(0);
        self.watches.snapshot(id, baseline)
    }

    pub fn is_running(&self, id: Uuid) -> bool {
        self.watches.is_running(id)
    }

    pub fn running(&self) -> Vec<Uuid> {
        self.watches.running()
    }

    /// Start the task's stopwatch. A task that has not been started yet is
    /// promoted to in progress; other statuses are left alone.
    ///
    /// Returns false if the stopwatch was already running.
    pub fn start(&mut self, id: Uuid) -> Result<bool> {
        let task = self.require(id)?;
        let (baseline, status) = (task.current_duration(), task.status());

        if !self.watches.start(id, baseline) {
            return Ok(false);
        }
        if status == TaskStatus::NotStarted {
            self.store.update_task(id, TaskUpdate::SetStatus(TaskStatus::InProgress))?;
        }
        tracing::debug!(task = %id, from = baseline, "stopwatch started");
        Ok(true)
    }

    pub fn stop(&mut self, id: Uuid) -> bool {
        let stopped = self.watches.stop(id);
        if stopped {
            tracing::debug!(task = %id, "stopwatch stopped");
        }
        stopped
    }

    /// Start if idle, stop if running; returns whether it is running now
    pub fn toggle(&mut self, id: Uuid) -> Result<bool> {
        if self.is_running(id) {
            self.stop(id);
            Ok(false)
        } else {
            self.start(id)?;
            Ok(true)
        }
    }

    /// Overwrite the session time with a number of minutes typed by the user.
    ///
    /// Stops the stopwatch first. Input that is not a number counts as zero.
    /// A number above [`MAX_MINUTES`] is rejected and changes nothing.
    pub fn edit_minutes(&mut self, id: Uuid, input: &str) -> Result<u64> {
        self.require(id)?;
        let minutes = match parse_minutes(input) {
            Ok(minutes) => minutes,
            Err(err @ StudyError::InvalidMinutes(_)) => {
                tracing::warn!(task = %id, %err, "treating minutes as 0");
                0
            }
            Err(err) => return Err(err),
        };

        let seconds = self.watches.edit(id, i64::try_from(minutes).unwrap_or(0));
        self.store.update_task(id, TaskUpdate::SetDuration(seconds))?;
        tracing::info!(task = %id, seconds, "session time edited");
        Ok(seconds)
    }

    pub fn save_history(&mut self, id: Uuid) -> Result<Option<HistoryEntry>> {
        self.save_history_on(id, Local::now().date_naive())
    }

    /// Commit the session to history. A running stopwatch is stopped first
    /// so no tick can land after the commit and be counted twice.
    pub fn save_history_on(&mut self, id: Uuid, date: NaiveDate) -> Result<Option<HistoryEntry>> {
        self.require(id)?;
        self.stop(id);
        let entry = self.store.save_history_on(id, date)?;
        self.sync(id);
        Ok(entry)
    }

    pub fn cycle_status(&mut self, id: Uuid) -> Result<TaskStatus> {
        let status = self.store.cycle_status(id)?;
        self.sync(id);
        Ok(status)
    }

    pub fn set_status(&mut self, id: Uuid, status: TaskStatus) -> Result<bool> {
        let changed = self.store.update_task(id, TaskUpdate::SetStatus(status))?;
        self.sync(id);
        Ok(changed)
    }

    pub fn set_memo(&mut self, id: Uuid, memo: impl Into<String>) -> Result<bool> {
        let changed = self.store.update_task(id, TaskUpdate::SetMemo(memo.into()))?;
        self.sync(id);
        Ok(changed)
    }

    pub fn create_unit(&mut self, round: i64) -> Result<Unit> {
        self.store.create_unit(round)
    }

    pub fn select_unit(&mut self, unit: Option<Unit>) {
        self.store.select_unit(unit);
    }

    pub fn pending_delete(&self) -> Option<PendingDelete> {
        self.pending_delete
    }

    /// Ask to delete a task; nothing happens until [`Tracker::confirm_delete`]
    pub fn request_delete_task(&mut self, id: Uuid) -> Result<()> {
        self.require(id)?;
        self.pending_delete = Some(PendingDelete::Task(id));
        Ok(())
    }

    /// Ask to delete a whole unit; nothing happens until confirmed
    pub fn request_delete_unit(&mut self, unit: Unit) {
        self.pending_delete = Some(PendingDelete::Unit(unit));
    }

    pub fn cancel_delete(&mut self) -> Option<PendingDelete> {
        self.pending_delete.take()
    }

    /// Carry out the pending delete, if any. Returns the number of tasks
    /// removed; their stopwatches go with them.
    pub fn confirm_delete(&mut self) -> usize {
        let Some(pending) = self.pending_delete.take() else {
            return 0;
        };

        match pending {
            PendingDelete::Task(id) => match self.store.delete_task(id) {
                Ok(_) => {
                    self.watches.remove(id);
                    1
                }
                Err(err) => {
                    tracing::warn!(%err, "delete skipped");
                    0
                }
            },
            PendingDelete::Unit(unit) => {
                let removed = self.store.delete_unit(unit);
                for task in &removed {
                    self.watches.remove(task.id());
                }
                removed.len()
            }
        }
    }

    /// Feed every due stopwatch tick into the store.
    /// Returns the number of store updates issued.
    pub fn poll(&mut self) -> usize {
        let store = &mut self.store;
        let mut updates = 0;
        self.watches.poll(|id, total| {
            match store.update_task(id, TaskUpdate::SetDuration(total)) {
                Ok(_) => updates += 1,
                Err(err) => tracing::warn!(%err, "dropping tick"),
            }
        });
        updates
    }
}
