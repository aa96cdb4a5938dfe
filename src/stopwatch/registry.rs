use super::clock::Clock;
use super::engine::{Stopwatch, StopwatchSnapshot};
use std::collections::HashMap;
use uuid::Uuid;

/// One live stopwatch per task id.
///
/// Every view of a task goes through the same entry, so two views can never
/// run separate timers against the same task.
#[derive(Debug)]
pub struct StopwatchRegistry<C: Clock> {
    clock: C,
    watches: HashMap<Uuid, Stopwatch>,
}

impl<C: Clock> StopwatchRegistry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            watches: HashMap::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn get(&self, id: Uuid) -> Option<&Stopwatch> {
        self.watches.get(&id)
    }

    /// Current reading; a task without a stopwatch reads as idle at `baseline`
    pub fn snapshot(&self, id: Uuid, baseline: u64) -> StopwatchSnapshot {
        self.watches
            .get(&id)
            .map(Stopwatch::snapshot)
            .unwrap_or(StopwatchSnapshot {
                elapsed_seconds: baseline,
                is_running: false,
            })
    }

    pub fn is_running(&self, id: Uuid) -> bool {
        self.watches.get(&id).is_some_and(Stopwatch::is_running)
    }

    /// Ids of all running stopwatches
    pub fn running(&self) -> Vec<Uuid> {
        self.watches
            .iter()
            .filter(|(_, watch)| watch.is_running())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Start the task's stopwatch from `baseline` if idle.
    /// Returns false when it was already running.
    pub fn start(&mut self, id: Uuid, baseline: u64) -> bool {
        let now = self.clock.now();
        let watch = self.watches.entry(id).or_insert_with(|| Stopwatch::new(baseline));
        watch.adopt(baseline);
        watch.start(now)
    }

    pub fn stop(&mut self, id: Uuid) -> bool {
        self.watches.get_mut(&id).is_some_and(Stopwatch::stop)
    }

    /// Stop and overwrite with whole minutes; returns the new reading
    pub fn edit(&mut self, id: Uuid, minutes: i64) -> u64 {
        self.watches
            .entry(id)
            .or_insert_with(|| Stopwatch::new(0))
            .edit(minutes)
    }

    /// Offer an external reading; only idle stopwatches take it
    pub fn adopt(&mut self, id: Uuid, external: u64) -> bool {
        self.watches.get_mut(&id).is_some_and(|watch| watch.adopt(external))
    }

    /// Drop a task's stopwatch along with any pending tick
    pub fn remove(&mut self, id: Uuid) -> Option<Stopwatch> {
        self.watches.remove(&id)
    }

    /// Keep only stopwatches whose task passes `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(Uuid) -> bool) {
        self.watches.retain(|id, _| keep(*id));
    }

    /// Fire all due ticks; `on_tick` receives the task id and its new total.
    /// Returns the number of ticks fired.
    pub fn poll(&mut self, mut on_tick: impl FnMut(Uuid, u64)) -> u64 {
        let now = self.clock.now();
        let mut fired = 0;
        for (id, watch) in self.watches.iter_mut() {
            fired += watch.poll(now, |total| on_tick(*id, total));
        }
        fired
    }
}
