use std::time::Duration;

/// Interval between ticks while running
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Idle,
    /// Counting; the next tick is due at `next_tick` on the owning clock
    Running { next_tick: Duration },
}

/// What a view needs to draw a stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopwatchSnapshot {
    pub elapsed_seconds: u64,
    pub is_running: bool,
}

/// Per-task stopwatch state machine.
///
/// Ticks are scheduled on a fixed grid from the moment of `start`, so a
/// late poll catches up with exactly the number of whole seconds that
/// passed and never drifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: u64,
    state: StopwatchState,
}

impl Stopwatch {
    /// Idle stopwatch starting from `baseline` seconds
    pub fn new(baseline: u64) -> Self {
        Self {
            elapsed: baseline,
            state: StopwatchState::Idle,
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, StopwatchState::Running { .. })
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        StopwatchSnapshot {
            elapsed_seconds: self.elapsed,
            is_running: self.is_running(),
        }
    }

    /// idle → running. Returns false if it was already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = StopwatchState::Running {
            next_tick: now + TICK_INTERVAL,
        };
        true
    }

    /// running → idle. The pending tick is dropped here, so no later poll
    /// can fire it.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = StopwatchState::Idle;
        was_running
    }

    /// Stop and overwrite the reading with `minutes` whole minutes.
    /// Negative input counts as zero. Returns the new reading in seconds.
    pub fn edit(&mut self, minutes: i64) -> u64 {
        self.stop();
        self.elapsed = u64::try_from(minutes).unwrap_or(0).saturating_mul(60);
        self.elapsed
    }

    /// Take an externally supplied reading as the new baseline.
    ///
    /// Ignored while running: the running stopwatch is the only writer.
    pub fn adopt(&mut self, external: u64) -> bool {
        if self.is_running() || self.elapsed == external {
            return false;
        }
        self.elapsed = external;
        true
    }

    /// Fire every tick due by `now`, calling `on_tick` with the new total
    /// after each one. Returns the number of ticks fired.
    pub fn poll(&mut self, now: Duration, mut on_tick: impl FnMut(u64)) -> u64 {
        let StopwatchState::Running { mut next_tick } = self.state else {
            return 0;
        };

        let mut fired = 0;
        while next_tick <= now {
            self.elapsed = self.elapsed.saturating_add(1);
            fired += 1;
            on_tick(self.elapsed);
            next_tick += TICK_INTERVAL;
        }

        self.state = StopwatchState::Running { next_tick };
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_new_is_idle() {
        let watch = Stopwatch::new(42);
        assert_eq!(watch.snapshot(), StopwatchSnapshot { elapsed_seconds: 42, is_running: false });
        assert_eq!(watch.state(), StopwatchState::Idle);
    }

    #[test]
    fn test_ticks_once_per_whole_second() {
        let mut watch = Stopwatch::new(0);
        assert!(watch.start(secs(10)));

        let mut seen = Vec::new();
        assert_eq!(watch.poll(secs(10) + Duration::from_millis(999), |t| seen.push(t)), 0);
        assert_eq!(watch.poll(secs(11), |t| seen.push(t)), 1);
        assert_eq!(watch.poll(secs(14) + Duration::from_millis(500), |t| seen.push(t)), 3);

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(watch.elapsed(), 4);
    }

    #[test]
    fn test_late_polls_do_not_drift() {
        let mut watch = Stopwatch::new(100);
        watch.start(Duration::ZERO);

        let mut updates = 0;
        let mut now = Duration::ZERO;
        for _ in 0..60 {
            now += Duration::from_millis(1_250);
            updates += watch.poll(now, |_| {});
        }

        // 75 seconds of wall time
        assert_eq!(updates, 75);
        assert_eq!(watch.elapsed(), 175);
    }

    #[test]
    fn test_no_tick_after_stop() {
        let mut watch = Stopwatch::new(0);
        watch.start(Duration::ZERO);
        watch.poll(secs(2), |_| {});
        assert!(watch.stop());

        let mut calls = 0;
        assert_eq!(watch.poll(secs(3600), |_| calls += 1), 0);
        assert_eq!(calls, 0);
        assert_eq!(watch.elapsed(), 2);
        assert!(!watch.stop());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut watch = Stopwatch::new(0);
        assert!(watch.start(Duration::ZERO));
        // A second start must not push the schedule back
        assert!(!watch.start(Duration::from_millis(900)));
        assert_eq!(watch.poll(secs(1), |_| {}), 1);
    }

    #[test]
    fn test_restart_schedules_from_new_start() {
        let mut watch = Stopwatch::new(0);
        watch.start(Duration::ZERO);
        watch.poll(Duration::from_millis(1_500), |_| {});
        watch.stop();

        watch.start(secs(10));
        assert_eq!(watch.poll(Duration::from_millis(10_900), |_| {}), 0);
        assert_eq!(watch.poll(secs(11), |_| {}), 1);
        assert_eq!(watch.elapsed(), 2);
    }

    #[test]
    fn test_edit_stops_and_overwrites() {
        let mut watch = Stopwatch::new(0);
        watch.start(Duration::ZERO);
        watch.poll(secs(5), |_| {});

        assert_eq!(watch.edit(25), 1500);
        assert!(!watch.is_running());
        assert_eq!(watch.poll(secs(60), |_| {}), 0);

        assert_eq!(watch.edit(-3), 0);
    }

    #[test]
    fn test_adopt_only_while_idle() {
        let mut watch = Stopwatch::new(10);
        assert!(watch.adopt(0));
        assert_eq!(watch.elapsed(), 0);

        watch.start(Duration::ZERO);
        assert!(!watch.adopt(999));
        assert_eq!(watch.poll(secs(1), |_| {}), 1);
        assert_eq!(watch.elapsed(), 1);
    }

    #[test]
    fn test_reading_saturates_at_max() {
        let mut watch = Stopwatch::new(u64::MAX - 1);
        watch.start(Duration::ZERO);

        let mut seen = Vec::new();
        assert_eq!(watch.poll(secs(3), |t| seen.push(t)), 3);
        assert_eq!(seen, vec![u64::MAX, u64::MAX, u64::MAX]);
        assert_eq!(watch.edit(i64::MAX), u64::MAX);
    }
}
