use crate::config::files::{atomic_write, read_optional};
use crate::domain::TestResult;
use crate::store::TestRecordStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Load test results from a JSON array. `None` when the file doesn't exist.
///
/// Results go through `add_test`, so a file with a repeated id is rejected.
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<Option<TestRecordStore>> {
    let path = path.as_ref();
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };

    let results: Vec<TestResult> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid test results file: {}", path.display()))?;

    // add_test prepends; insert in reverse to keep file order
    let mut store = TestRecordStore::default();
    for result in results.into_iter().rev() {
        store
            .add_test(result)
            .with_context(|| format!("Invalid test results file: {}", path.display()))?;
    }

    tracing::debug!(path = %path.display(), count = store.len(), "test results loaded");
    Ok(Some(store))
}

pub fn save_results<P: AsRef<Path>>(path: P, store: &TestRecordStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store.results())?;
    atomic_write(path, &json)
}
