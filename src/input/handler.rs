use crate::app::{AppState, Tab, UiMode};
use crossterm::event::{KeyCode, KeyEvent};
use levelup::domain::{ChartKey, TaskStatus};
use levelup::stopwatch::Clock;

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => match app.tab {
            Tab::Study => handle_study_keys(app, key),
            Tab::Tests => handle_tests_keys(app, key),
        },
        UiMode::EditingMinutes | UiMode::EditingMemo | UiMode::NewUnit | UiMode::EditingRange => {
            handle_input_mode(app, key);
            false
        }
        UiMode::ConfirmDelete => {
            handle_confirm_mode(app, key);
            false
        }
    }
}

fn handle_study_keys<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> bool {
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        KeyCode::Tab => app.switch_pane(),

        KeyCode::Enter => app.toggle_stopwatch(),
        KeyCode::Char('s') => app.cycle_status(),
        KeyCode::Char('1') => app.set_status(TaskStatus::NotStarted),
        KeyCode::Char('2') => app.set_status(TaskStatus::InProgress),
        KeyCode::Char('3') => app.set_status(TaskStatus::Completed),
        KeyCode::Char('e') => app.start_edit_minutes(),
        KeyCode::Char('m') => app.start_edit_memo(),
        KeyCode::Char('h') => app.save_history(),
        KeyCode::Char('n') => app.start_new_unit(),

        // Deletes only open the confirm dialog
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_task(),
        KeyCode::Char('X') => app.request_delete_unit(),

        KeyCode::Char('t') => app.switch_tab(),
        _ => {}
    }
    false
}

fn handle_tests_keys<C: Clock>(app: &mut AppState<C>, key: KeyEvent) -> bool {
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('t') | KeyCode::Esc => app.switch_tab(),
        KeyCode::Up => app.move_test_selection_up(),
        KeyCode::Down => app.move_test_selection_down(),
        KeyCode::Char('f') => app.cycle_type_filter(),
        KeyCode::Char('d') => app.start_edit_range(),
        KeyCode::Char(c @ '0'..='4') => {
            let index = c as usize - '0' as usize;
            if let Some(chart_key) = ChartKey::all().get(index) {
                app.toggle_chart_key(*chart_key);
            }
        }
        _ => {}
    }
    false
}

fn handle_input_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
}

fn handle_confirm_mode<C: Clock>(app: &mut AppState<C>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Pane;
    use crossterm::event::KeyModifiers;
    use levelup::config::Settings;
    use levelup::seed::{sample_tasks, sample_tests};
    use levelup::stopwatch::ManualClock;
    use levelup::Tracker;

    fn create_test_app() -> AppState<ManualClock> {
        let tracker = Tracker::new(sample_tasks(), ManualClock::new());
        AppState::new(tracker, sample_tests(), &Settings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState<ManualClock>, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Pane::Units);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_enter_starts_and_promotes() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('n')));
        type_text(&mut app, "15");
        handle_key(&mut app, key(KeyCode::Enter));

        let id = app.selected_task_id().unwrap();
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.tracker.is_running(id));
        assert_eq!(app.tracker.task(id).unwrap().status(), TaskStatus::InProgress);

        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.tracker.is_running(id));
    }

    #[test]
    fn test_memo_then_history() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Down));
        let id = app.selected_task_id().unwrap();

        handle_key(&mut app, key(KeyCode::Char('m')));
        assert_eq!(app.ui_mode, UiMode::EditingMemo);
        for _ in 0..20 {
            handle_key(&mut app, key(KeyCode::Backspace));
        }
        type_text(&mut app, "復習済");
        handle_key(&mut app, key(KeyCode::Enter));

        handle_key(&mut app, key(KeyCode::Char('h')));
        let task = app.tracker.task(id).unwrap();
        assert_eq!(task.history().len(), 1);
        assert_eq!(task.history()[0].memo, "復習済");
        assert_eq!(task.history()[0].duration, 1200);
        assert_eq!(task.current_duration(), 0);
    }

    #[test]
    fn test_escape_cancels_input() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();
        handle_key(&mut app, key(KeyCode::Char('e')));
        type_text(&mut app, "99");
        handle_key(&mut app, key(KeyCode::Esc));

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tracker.task(id).unwrap().current_duration(), 0);
    }

    #[test]
    fn test_delete_waits_for_confirmation() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();

        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        // Unrelated keys don't confirm
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.tracker.task(id).is_some());

        handle_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.tracker.task(id).is_some());

        handle_key(&mut app, key(KeyCode::Char('x')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert!(app.tracker.task(id).is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_number_keys_set_status() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();
        assert_eq!(app.tracker.task(id).unwrap().status(), TaskStatus::Completed);

        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.tracker.task(id).unwrap().status(), TaskStatus::InProgress);
        handle_key(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.tracker.task(id).unwrap().status(), TaskStatus::NotStarted);
        handle_key(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.tracker.task(id).unwrap().status(), TaskStatus::Completed);
    }

    #[test]
    fn test_tests_tab_selection_and_range() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t')));

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_test, 2);
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_test, 1);

        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.ui_mode, UiMode::EditingRange);
        for _ in 0..40 {
            handle_key(&mut app, key(KeyCode::Backspace));
        }
        type_text(&mut app, "2025/12/01~2025/12/31");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.ui_mode, UiMode::Normal);
        let (start, end) = app.test_filter.date_range.unwrap();
        assert_eq!(start.to_string(), "2025-12-01");
        assert_eq!(end.to_string(), "2025-12-31");
        assert!(app.table_tests().iter().all(|t| t.date >= start));
    }

    #[test]
    fn test_tests_tab_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.tab, Tab::Tests);

        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.chart_keys, vec![ChartKey::Total, ChartKey::Japanese]);

        handle_key(&mut app, key(KeyCode::Char('f')));
        assert!(app.test_filter.test_type.is_some());

        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.tab, Tab::Study);
    }
}
