use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, running_style, status_style, title_style};
use levelup::domain::{format_time, month_day};
use levelup::stopwatch::Clock;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };
    let watch = app.tracker.snapshot(task.id());

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Subject: ", title_style()),
        Span::raw(task.subject().label()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Task:    ", title_style()),
        Span::raw(task.material_name()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Status:  ", title_style()),
        Span::styled(task.status().label(), status_style(task.status())),
    ]));
    lines.push(Line::raw(""));

    // Stopwatch
    let (elapsed_style, state) = if watch.is_running {
        (running_style(), "  RUNNING")
    } else {
        (default_style(), "")
    };
    lines.push(Line::from(vec![
        Span::styled("Session: ", title_style()),
        Span::styled(format_time(watch.elapsed_seconds), elapsed_style),
        Span::styled(state, running_style()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Total:   ", title_style()),
        Span::raw(format_time(task.total_time())),
    ]));

    if task.current_memo().trim().is_empty() {
        lines.push(Line::from(Span::styled("Memo: (empty)", default_style())));
    } else {
        lines.push(Line::from(Span::styled("Memo:", title_style())));
        for memo_line in task.current_memo().lines() {
            lines.push(Line::raw(format!("  {}", memo_line)));
        }
    }
    lines.push(Line::raw(""));

    // History, newest first
    lines.push(Line::from(Span::styled(
        format!("History ({})", task.history().len()),
        title_style(),
    )));
    for entry in task.history().iter().rev() {
        let memo = if entry.memo.is_empty() {
            String::new()
        } else {
            format!("  {}", entry.memo)
        };
        lines.push(Line::raw(format!(
            "  {}  {}{}",
            month_day(entry.date),
            format_time(entry.duration),
            memo
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
