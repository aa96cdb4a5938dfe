use crate::domain::{month_day, ChartKey, SortOrder, TestResult, TestType};
use crate::error::{Result, StudyError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Criteria for narrowing the stored test results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFilter {
    /// `None` keeps every type
    pub test_type: Option<TestType>,
    /// Inclusive `(start, end)` bounds
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl TestFilter {
    pub fn matches(&self, result: &TestResult) -> bool {
        if let Some(test_type) = self.test_type {
            if result.test_type != test_type {
                return false;
            }
        }

        if let Some((start, end)) = self.date_range {
            if result.date < start || result.date > end {
                return false;
            }
        }

        true
    }
}

/// One point on the deviation chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Axis label, "MM/DD"
    pub label: String,
    pub full_date: NaiveDate,
    pub test_name: String,
    #[serde(rename = "type")]
    pub test_type: TestType,
    /// Deviation score per requested series
    #[serde(flatten)]
    pub values: BTreeMap<ChartKey, f64>,
}

/// Owns the recorded test results, newest additions first
#[derive(Debug, Clone, Default)]
pub struct TestRecordStore {
    results: Vec<TestResult>,
}

impl TestRecordStore {
    pub fn new(results: Vec<TestResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Prepend a result. Scores are stored as given; only the id must be new.
    pub fn add_test(&mut self, result: TestResult) -> Result<()> {
        if self.results.iter().any(|r| r.id == result.id) {
            tracing::warn!(id = %result.id, "duplicate test id rejected");
            return Err(StudyError::DuplicateTestId(result.id));
        }

        tracing::debug!(id = %result.id, name = %result.name, "test result added");
        self.results.insert(0, result);
        Ok(())
    }

    /// Results matching the criteria, in store order
    pub fn filter(&self, criteria: &TestFilter) -> Vec<&TestResult> {
        self.results.iter().filter(|r| criteria.matches(r)).collect()
    }

    /// All results sorted by date; equal dates keep store order
    pub fn sort_chronological(&self, order: SortOrder) -> Vec<&TestResult> {
        let mut sorted: Vec<&TestResult> = self.results.iter().collect();
        sort_by_date(&mut sorted, order);
        sorted
    }

    /// Earliest and latest test dates, used as the default filter range
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.results.iter().map(|r| r.date).min()?;
        let max = self.results.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

/// Stable sort of a result list by date
pub fn sort_by_date(results: &mut [&TestResult], order: SortOrder) {
    match order {
        SortOrder::Ascending => results.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => results.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

/// Chart series for a set of results: oldest first, only requested keys set
pub fn project_for_chart(results: &[&TestResult], keys: &[ChartKey]) -> Vec<ChartPoint> {
    let mut sorted = results.to_vec();
    sort_by_date(&mut sorted, SortOrder::Ascending);

    sorted
        .into_iter()
        .map(|result| ChartPoint {
            label: month_day(result.date),
            full_date: result.date,
            test_name: result.name.clone(),
            test_type: result.test_type,
            values: keys.iter().map(|&key| (key, result.deviation(key))).collect(),
        })
        .collect()
}
