pub mod task_store;
pub mod test_store;

pub use task_store::TaskStore;
pub use test_store::{project_for_chart, sort_by_date, ChartPoint, TestFilter, TestRecordStore};
