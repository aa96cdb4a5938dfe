use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, selected_style, series_color, title_style};
use levelup::domain::{format_score, ChartKey, Subject, TestResult};
use levelup::store::ChartPoint;
use levelup::stopwatch::Clock;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the test table, newest first
pub fn render_test_table<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let results = app.table_tests();

    let filter = app
        .test_filter
        .test_type
        .map(|t| t.label())
        .unwrap_or("all");
    let range = match app.test_filter.date_range {
        Some((start, end)) => format!("{} - {}", start.format("%Y/%m/%d"), end.format("%Y/%m/%d")),
        None => "all dates".to_string(),
    };
    let title = format!(" Tests ({}) · {} · {} ", results.len(), filter, range);

    let mut header = vec!["Date", "Test", "Type", "4科"];
    header.extend(Subject::all().iter().map(|s| s.label()));
    header.push("Rank");

    let rows: Vec<Row> = results.iter().map(|result| test_row(result)).collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(title_style()))
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        );

    let selected = (!results.is_empty()).then_some(app.selected_test);
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

/// Score, average, deviation and rank per line; four-subject total first
fn score_rows(result: &TestResult) -> Vec<[String; 5]> {
    ChartKey::all()
        .iter()
        .map(|key| {
            let line = result.line(*key);
            [
                key.label().to_string(),
                format_score(line.score),
                format_score(line.average),
                format!("{:.1}", line.deviation_score),
                line.rank.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

/// Render the full figures of the test under the table cursor
pub fn render_score_details<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());

    let Some(result) = app.selected_test() else {
        f.render_widget(Paragraph::new("No test selected").block(block.title(" Scores ")), area);
        return;
    };

    let title = format!(" {} {} ", result.date.format("%m/%d"), result.name);
    let rows: Vec<Row> = score_rows(result)
        .into_iter()
        .map(|cells| Row::new(cells).style(default_style()))
        .collect();
    let widths = [
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Min(9),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["", "得点", "平均", "偏差値", "順位"]).style(title_style()))
        .block(block.title(Span::styled(title, title_style())));

    f.render_widget(table, area);
}

fn test_row(result: &TestResult) -> Row<'static> {
    let mut cells = vec![
        Cell::from(result.date.format("%Y/%m/%d").to_string()),
        Cell::from(result.name.clone()),
        Cell::from(result.test_type.label()),
        Cell::from(format!("{:.1}", result.total4.deviation_score)),
    ];
    cells.extend(
        Subject::all()
            .iter()
            .map(|s| Cell::from(format!("{:.1}", result.subjects.get(*s).deviation_score))),
    );
    cells.push(Cell::from(result.total4.rank.clone().unwrap_or_else(|| "-".to_string())));
    Row::new(cells).style(default_style())
}

/// (x, y) series for one chart key; x is the point index
fn series(points: &[ChartPoint], key: ChartKey) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.values.get(&key).map(|v| (i as f64, *v)))
        .collect()
}

/// y-axis bounds padded to the nearest 5
fn y_bounds(data: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let values = data.iter().flatten().map(|(_, y)| *y);
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if min > max {
        return [30.0, 70.0];
    }
    [((min - 2.0) / 5.0).floor() * 5.0, ((max + 2.0) / 5.0).ceil() * 5.0]
}

/// Render the deviation chart, oldest first
pub fn render_chart<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let points = app.chart_points();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Deviation ", title_style()));

    if points.is_empty() {
        f.render_widget(Paragraph::new("No tests in range").block(block), area);
        return;
    }

    let data: Vec<Vec<(f64, f64)>> = app.chart_keys.iter().map(|key| series(&points, *key)).collect();
    let datasets: Vec<Dataset> = app
        .chart_keys
        .iter()
        .zip(&data)
        .map(|(key, values)| {
            Dataset::default()
                .name(key.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(*key)))
                .data(values)
        })
        .collect();

    let [y_min, y_max] = y_bounds(&data);
    let last = (points.len() - 1) as f64;
    let x_labels = match (points.first(), points.last()) {
        (Some(first), Some(latest)) if points.len() > 1 => {
            vec![Span::raw(first.label.clone()), Span::raw(latest.label.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.label.clone())],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, last.max(1.0)]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.0}", y_min)),
                    Span::raw("50"),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup::seed::sample_tests;
    use levelup::store::project_for_chart;
    use levelup::domain::SortOrder;

    #[test]
    fn test_series_follows_point_order() {
        let tests = sample_tests();
        let results = tests.sort_chronological(SortOrder::Ascending);
        let points = project_for_chart(&results, &[ChartKey::Total]);

        let total = series(&points, ChartKey::Total);
        assert_eq!(total.len(), 20);
        assert_eq!(total[0], (0.0, 65.2));
        assert!(series(&points, ChartKey::Math).is_empty());
    }

    #[test]
    fn test_score_rows_show_raw_figures() {
        let tests = sample_tests();
        let newest = tests.sort_chronological(SortOrder::Descending)[0];
        let rows = score_rows(newest);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ["4科", "194", "209.6", "44.2", "1615/2216"].map(String::from));
        assert_eq!(rows[1], ["算数", "46", "57.6", "42.2", "1665/2216"].map(String::from));
        assert_eq!(rows[4][0], Subject::Social.label());
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[vec![(0.0, 44.2), (1.0, 66.7)]]), [40.0, 70.0]);
        assert_eq!(y_bounds(&[]), [30.0, 70.0]);
    }
}
