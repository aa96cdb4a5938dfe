use crate::domain::{format_score, format_time, month_day, ChartKey, SortOrder, Subject, TestResult};
use crate::report::stats::{deviation_summary, unit_summaries};
use crate::store::{sort_by_date, TaskStore, TestFilter, TestRecordStore};
use chrono::NaiveDate;

/// Format a deviation score with one decimal place
fn format_deviation(value: f64) -> String {
    format!("{:.1}", value)
}

/// Score, average, deviation and rank for each line of one test
fn score_table(result: &TestResult) -> String {
    let mut table = String::new();
    table.push_str("| | 得点 | 平均 | 偏差値 | 順位 |\n");
    table.push_str("|---|---:|---:|---:|---|\n");
    for key in ChartKey::all() {
        let line = result.line(*key);
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            key.label(),
            format_score(line.score),
            format_score(line.average),
            format_deviation(line.deviation_score),
            line.rank.as_deref().unwrap_or("-")
        ));
    }
    table
}

/// Render a markdown study report: unit progress followed by test results
pub fn generate_report(
    tasks: &TaskStore,
    tests: &TestRecordStore,
    filter: &TestFilter,
    report_date: NaiveDate,
) -> String {
    let mut report = String::new();

    // Header
    report.push_str(&format!("# Study Report - {}\n\n", report_date));

    // Units Section
    let summaries = unit_summaries(tasks);
    report.push_str("## Units\n\n");
    if summaries.is_empty() {
        report.push_str("No units yet.\n\n");
    }

    for summary in &summaries {
        report.push_str(&format!(
            "### {} - {}% ({})\n\n",
            summary.unit,
            summary.overall.progress_percent,
            format_time(summary.overall.total_time_seconds)
        ));
        report.push_str("| Subject | Progress | Time |\n");
        report.push_str("|---|---:|---:|\n");
        for (subject, stats) in &summary.by_subject {
            report.push_str(&format!(
                "| {} | {}% | {} |\n",
                subject.label(),
                stats.progress_percent,
                format_time(stats.total_time_seconds)
            ));
        }
        report.push('\n');
    }

    // Tests Section
    let mut results = tests.filter(filter);
    sort_by_date(&mut results, SortOrder::Descending);

    report.push_str("## Tests\n\n");
    if results.is_empty() {
        report.push_str("No test results in range.\n");
        return report;
    }

    report.push_str("| Date | Test | Type | 4科 | 算数 | 国語 | 理科 | 社会 | Rank |\n");
    report.push_str("|---|---|---|---:|---:|---:|---:|---:|---|\n");
    for result in &results {
        report.push_str(&format!(
            "| {} | {} | {} | {} ",
            result.date.format("%Y/%m/%d"),
            result.name,
            result.test_type.label(),
            format_deviation(result.total4.deviation_score)
        ));
        for subject in Subject::all() {
            report.push_str(&format!(
                "| {} ",
                format_deviation(result.subjects.get(*subject).deviation_score)
            ));
        }
        report.push_str(&format!("| {} |\n", result.total4.rank.as_deref().unwrap_or("-")));
    }
    report.push('\n');

    // Deviation summary
    report.push_str("### Deviation Summary\n\n");
    for key in ChartKey::all() {
        if let Some(summary) = deviation_summary(&results, *key) {
            report.push_str(&format!(
                "- **{}:** avg {} / best {} / latest {} ({} tests)\n",
                key.label(),
                format_deviation(summary.average),
                format_deviation(summary.best),
                format_deviation(summary.latest),
                summary.count
            ));
        }
    }

    // Per-test scores
    report.push_str("\n### Scores\n");
    for result in &results {
        report.push_str(&format!(
            "\n#### {} {}\n\n",
            result.date.format("%Y/%m/%d"),
            result.name
        ));
        report.push_str(&score_table(result));
    }

    if let Some(latest) = results.first() {
        report.push_str(&format!("\nLatest: {} on {}\n", latest.name, month_day(latest.date)));
    }

    report
}
