use crate::app::{AppState, Pane};
use crate::ui::styles::{border_style, default_style, focused_border_style, gauge_style, selected_style, title_style};
use levelup::domain::{format_time, progress_bar};
use levelup::report::{unit_summaries, UnitSummary};
use levelup::stopwatch::Clock;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the unit list with each unit's overall progress
pub fn render_unit_pane<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let summaries = unit_summaries(app.tracker.store());
    let active = app.current_unit();

    let items: Vec<ListItem> = summaries
        .iter()
        .map(|summary| {
            let style = if Some(summary.unit) == active {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(unit_lines(summary)).style(style)
        })
        .collect();

    let border = if app.focus == Pane::Units {
        focused_border_style()
    } else {
        border_style()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(" Units ", title_style())),
    );

    let selected = summaries.iter().position(|s| Some(s.unit) == active);
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Two lines per unit:
///   第14回  50%
///   [#####-----] 2h5m
fn unit_lines(summary: &UnitSummary) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw(format!("{}  ", summary.unit)),
            Span::raw(format!("{}%", summary.overall.progress_percent)),
        ]),
        Line::from(vec![
            Span::styled(progress_bar(summary.overall.progress_percent, 10), gauge_style()),
            Span::raw(format!(" {}", format_time(summary.overall.total_time_seconds))),
        ]),
    ]
}
