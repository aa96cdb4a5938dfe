pub mod generator;
pub mod stats;

pub use generator::generate_report;
pub use stats::{compute_stats, deviation_summary, unit_stats, unit_summaries, DeviationSummary, Stats, UnitSummary};
