pub mod clock;
pub mod engine;
pub mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Stopwatch, StopwatchSnapshot, StopwatchState, TICK_INTERVAL};
pub use registry::StopwatchRegistry;
