use crate::app::{AppState, Pane};
use crate::ui::styles::{
    border_style, default_style, focused_border_style, group_style, running_style, selected_style, status_style,
    title_style,
};
use levelup::domain::{format_time, status_badge, StudyRow, Task};
use levelup::report::unit_stats;
use levelup::stopwatch::{Clock, StopwatchSnapshot};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the active unit's tasks grouped by subject and category
pub fn render_list_pane<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let store = app.tracker.store();
    let selected_id = app.selected_task_id();
    let mut selected_row = None;

    let items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            StudyRow::Subject(subject) => {
                let stats = app
                    .current_unit()
                    .map(|unit| unit_stats(store, unit, Some(subject)))
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {}", subject.short(), subject.label()), title_style()),
                    Span::raw(format!(
                        "  {}%  {}",
                        stats.progress_percent,
                        format_time(stats.total_time_seconds)
                    )),
                ]))
            }
            StudyRow::Category(category) => {
                ListItem::new(Line::styled(format!("  {}", category), group_style()))
            }
            StudyRow::Task(task) => {
                let is_selected = Some(task.id()) == selected_id;
                if is_selected {
                    selected_row = Some(idx);
                }
                let line = create_task_line(task, app.tracker.snapshot(task.id()), app.use_emoji);
                let style = if is_selected { selected_style() } else { default_style() };
                ListItem::new(line).style(style)
            }
        })
        .collect();

    let title = match app.current_unit() {
        Some(unit) => format!(" {} ", unit),
        None => " No unit - press n to create one ".to_string(),
    };
    let border = if app.focus == Pane::Tasks {
        focused_border_style()
    } else {
        border_style()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, title_style())),
    );

    let mut state = ListState::default().with_selected(selected_row);
    f.render_stateful_widget(list, area, &mut state);
}

/// Format: `    ✓ ①  15m0s ▶`
fn create_task_line(task: &Task, watch: StopwatchSnapshot, use_emoji: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw("    "),
        Span::styled(status_badge(task.status(), use_emoji).to_string(), status_style(task.status())),
        Span::raw(format!(" {}", task.title())),
    ];

    if watch.elapsed_seconds > 0 || watch.is_running {
        let style = if watch.is_running { running_style() } else { group_style() };
        spans.push(Span::styled(format!("  {}", format_time(watch.elapsed_seconds)), style));
    }
    if watch.is_running {
        spans.push(Span::styled(" ▶", running_style()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup::seed::sample_tasks;

    #[test]
    fn test_create_task_line() {
        let store = sample_tasks();
        let task = &store.tasks()[1];
        let watch = StopwatchSnapshot {
            elapsed_seconds: task.current_duration(),
            is_running: false,
        };

        let line_str = format!("{:?}", create_task_line(task, watch, true));
        assert!(line_str.contains("基本問題"));
        assert!(line_str.contains("20m0s"));
        assert!(!line_str.contains("▶"));
    }

    #[test]
    fn test_running_task_line() {
        let store = sample_tasks();
        let task = &store.tasks()[0];
        let watch = StopwatchSnapshot {
            elapsed_seconds: 3,
            is_running: true,
        };

        let line_str = format!("{:?}", create_task_line(task, watch, false));
        assert!(line_str.contains("[x]"));
        assert!(line_str.contains("0m3s"));
        assert!(line_str.contains("▶"));
    }
}
