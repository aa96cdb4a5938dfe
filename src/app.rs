use levelup::config::Settings;
use levelup::domain::{
    flatten_unit, format_date_range, format_time, parse_date_range, ChartKey, SortOrder, StudyRow, Task,
    TaskStatus, TestResult, TestType, Unit,
};
use levelup::store::{project_for_chart, sort_by_date, ChartPoint, TestFilter, TestRecordStore};
use levelup::stopwatch::{Clock, SystemClock};
use levelup::{PendingDelete, Tracker};
use uuid::Uuid;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Study,
    Tests,
}

/// Focused pane on the study screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Units,
    Tasks,
}

/// UI mode (for modal dialogs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingMinutes,
    EditingMemo,
    NewUnit,
    EditingRange,
    ConfirmDelete,
}

/// Main application state
pub struct AppState<C: Clock = SystemClock> {
    pub tracker: Tracker<C>,
    pub tests: TestRecordStore,
    pub tab: Tab,
    pub focus: Pane,
    pub ui_mode: UiMode,
    pub input: String,
    pub selected_index: usize,
    /// Row of the test table, newest first
    pub selected_test: usize,
    pub test_filter: TestFilter,
    pub chart_keys: Vec<ChartKey>,
    pub use_emoji: bool,
    pub status_message: Option<String>,
}

impl<C: Clock> AppState<C> {
    pub fn new(tracker: Tracker<C>, tests: TestRecordStore, settings: &Settings) -> Self {
        let test_filter = TestFilter {
            test_type: None,
            date_range: tests.date_bounds(),
        };

        let mut app = Self {
            tracker,
            tests,
            tab: Tab::Study,
            focus: Pane::Tasks,
            ui_mode: UiMode::Normal,
            input: String::new(),
            selected_index: 0,
            selected_test: 0,
            test_filter,
            chart_keys: settings.chart_keys.clone(),
            use_emoji: settings.use_emoji,
            status_message: None,
        };
        if app.tracker.store().active_unit().is_none() {
            let first = app.units().first().copied();
            app.tracker.select_unit(first);
        }
        app
    }

    /// Log a failed action and show it on the status line
    fn surface<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%err, "action ignored");
                self.status_message = Some(err.to_string());
                None
            }
        }
    }

    pub fn units(&self) -> Vec<Unit> {
        self.tracker.store().units()
    }

    pub fn current_unit(&self) -> Option<Unit> {
        self.tracker.store().active_unit()
    }

    /// Rows of the task pane for the active unit
    pub fn rows(&self) -> Vec<StudyRow<'_>> {
        match self.current_unit() {
            Some(unit) => flatten_unit(self.tracker.store().tasks(), unit),
            None => Vec::new(),
        }
    }

    /// Selectable task ids in display order
    pub fn task_ids(&self) -> Vec<Uuid> {
        self.rows()
            .into_iter()
            .filter_map(|row| match row {
                StudyRow::Task(task) => Some(task.id()),
                _ => None,
            })
            .collect()
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.task_ids().get(self.selected_index).copied()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.tracker.task(id))
    }

    fn clamp_selection(&mut self) {
        let count = self.task_ids().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    fn step_unit(&mut self, forward: bool) {
        let units = self.units();
        if units.is_empty() {
            return;
        }
        let index = self
            .current_unit()
            .and_then(|unit| units.iter().position(|u| *u == unit))
            .unwrap_or(0);
        let next = if forward {
            (index + 1).min(units.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        self.tracker.select_unit(Some(units[next]));
        self.selected_index = 0;
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Pane::Units => self.step_unit(false),
            Pane::Tasks => self.selected_index = self.selected_index.saturating_sub(1),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Pane::Units => self.step_unit(true),
            Pane::Tasks => {
                if self.selected_index + 1 < self.task_ids().len() {
                    self.selected_index += 1;
                }
            }
        }
    }

    pub fn switch_pane(&mut self) {
        self.focus = match self.focus {
            Pane::Units => Pane::Tasks,
            Pane::Tasks => Pane::Units,
        };
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Study => Tab::Tests,
            Tab::Tests => Tab::Study,
        };
    }

    pub fn toggle_stopwatch(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.tracker.toggle(id);
            self.surface(result);
        }
    }

    pub fn cycle_status(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.tracker.cycle_status(id);
            self.surface(result);
        }
    }

    /// Set the selected task's status directly
    pub fn set_status(&mut self, status: TaskStatus) {
        if let Some(id) = self.selected_task_id() {
            let result = self.tracker.set_status(id, status);
            if self.surface(result).is_some() {
                self.status_message = Some(format!("Status: {}", status.label()));
            }
        }
    }

    pub fn save_history(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let result = self.tracker.save_history(id);
        if let Some(entry) = self.surface(result) {
            self.status_message = Some(match entry {
                Some(entry) => format!("Saved {} to history", format_time(entry.duration)),
                None => "Nothing to save yet".to_string(),
            });
        }
    }

    pub fn start_edit_minutes(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let minutes = self.tracker.snapshot(id).elapsed_seconds / 60;
            self.input = minutes.to_string();
            self.ui_mode = UiMode::EditingMinutes;
        }
    }

    pub fn start_edit_memo(&mut self) {
        if let Some(memo) = self.selected_task().map(|task| task.current_memo().to_string()) {
            self.input = memo;
            self.ui_mode = UiMode::EditingMemo;
        }
    }

    pub fn start_new_unit(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::NewUnit;
    }

    /// Open the date range form, prefilled with the current range
    pub fn start_edit_range(&mut self) {
        self.input = self
            .test_filter
            .date_range
            .map(|(start, end)| format_date_range(start, end))
            .unwrap_or_default();
        self.ui_mode = UiMode::EditingRange;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input);
        let mode = std::mem::replace(&mut self.ui_mode, UiMode::Normal);

        match mode {
            UiMode::EditingMinutes => {
                if let Some(id) = self.selected_task_id() {
                    let result = self.tracker.edit_minutes(id, &input);
                    self.surface(result);
                }
            }
            UiMode::EditingMemo => {
                if let Some(id) = self.selected_task_id() {
                    let result = self.tracker.set_memo(id, input);
                    self.surface(result);
                }
            }
            UiMode::NewUnit => {
                let round = input.trim().parse::<i64>().unwrap_or(0);
                let result = self.tracker.create_unit(round);
                if self.surface(result).is_some() {
                    self.selected_index = 0;
                    self.focus = Pane::Tasks;
                }
            }
            UiMode::EditingRange => {
                // Blank input goes back to every test on record
                let result = parse_date_range(&input)
                    .map(|range| range.or_else(|| self.tests.date_bounds()));
                if let Some(range) = self.surface(result) {
                    self.test_filter.date_range = range;
                    self.clamp_test_selection();
                }
            }
            UiMode::Normal | UiMode::ConfirmDelete => {}
        }
    }

    pub fn request_delete_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.tracker.request_delete_task(id);
            if self.surface(result).is_some() {
                self.ui_mode = UiMode::ConfirmDelete;
            }
        }
    }

    pub fn request_delete_unit(&mut self) {
        if let Some(unit) = self.current_unit() {
            self.tracker.request_delete_unit(unit);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    /// Text for the confirm dialog
    pub fn pending_delete_message(&self) -> Option<String> {
        match self.tracker.pending_delete()? {
            PendingDelete::Task(id) => {
                let task = self.tracker.task(id)?;
                Some(format!("Delete \"{}\"?", task.material_name()))
            }
            PendingDelete::Unit(unit) => Some(format!("Delete {} and all of its tasks?", unit)),
        }
    }

    pub fn confirm_delete(&mut self) {
        let was_unit = matches!(self.tracker.pending_delete(), Some(PendingDelete::Unit(_)));
        let removed = self.tracker.confirm_delete();
        self.ui_mode = UiMode::Normal;

        if was_unit && self.current_unit().is_none() {
            let first = self.units().first().copied();
            self.tracker.select_unit(first);
            self.selected_index = 0;
        }
        self.clamp_selection();
        self.status_message = Some(format!("Deleted {} task(s)", removed));
    }

    pub fn cancel_delete(&mut self) {
        self.tracker.cancel_delete();
        self.ui_mode = UiMode::Normal;
    }

    /// Cycle the test type filter: all → curriculum → kumiwake → hantei → all
    pub fn cycle_type_filter(&mut self) {
        let types = TestType::all();
        self.test_filter.test_type = match self.test_filter.test_type {
            None => types.first().copied(),
            Some(current) => types
                .iter()
                .position(|t| *t == current)
                .and_then(|i| types.get(i + 1))
                .copied(),
        };
        self.clamp_test_selection();
    }

    fn clamp_test_selection(&mut self) {
        let count = self.table_tests().len();
        if self.selected_test >= count {
            self.selected_test = count.saturating_sub(1);
        }
    }

    pub fn move_test_selection_up(&mut self) {
        self.selected_test = self.selected_test.saturating_sub(1);
    }

    pub fn move_test_selection_down(&mut self) {
        if self.selected_test + 1 < self.table_tests().len() {
            self.selected_test += 1;
        }
    }

    /// Test under the table cursor
    pub fn selected_test(&self) -> Option<&TestResult> {
        self.table_tests().get(self.selected_test).copied()
    }

    /// Show or hide a chart series; the last one can't be hidden
    pub fn toggle_chart_key(&mut self, key: ChartKey) {
        if let Some(index) = self.chart_keys.iter().position(|k| *k == key) {
            if self.chart_keys.len() > 1 {
                self.chart_keys.remove(index);
            }
        } else {
            self.chart_keys.push(key);
            self.chart_keys.sort();
        }
    }

    /// Filtered tests, newest first
    pub fn table_tests(&self) -> Vec<&TestResult> {
        let mut results = self.tests.filter(&self.test_filter);
        sort_by_date(&mut results, SortOrder::Descending);
        results
    }

    /// Chart points for the filtered tests, oldest first
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        let mut results = self.tests.filter(&self.test_filter);
        sort_by_date(&mut results, SortOrder::Ascending);
        project_for_chart(&results, &self.chart_keys)
    }

    /// Advance stopwatches
    pub fn tick(&mut self) {
        self.tracker.poll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup::seed::{sample_tasks, sample_tests};
    use levelup::stopwatch::ManualClock;
    use chrono::NaiveDate;
    use levelup::store::TaskStore;

    fn create_test_app() -> AppState<ManualClock> {
        let tracker = Tracker::new(sample_tasks(), ManualClock::new());
        AppState::new(tracker, sample_tests(), &Settings::default())
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.current_unit().map(|u| u.round()), Some(14));
        assert_eq!(app.task_ids().len(), 2);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.test_filter.date_range, app.tests.date_bounds());
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_stopwatch_ticks_into_store() {
        let mut app = create_test_app();
        app.selected_index = 1;
        let id = app.selected_task_id().unwrap();
        let before = app.tracker.task(id).unwrap().current_duration();

        app.toggle_stopwatch();
        app.tracker.clock().advance_secs(3);
        app.tick();
        assert_eq!(app.tracker.task(id).unwrap().current_duration(), before + 3);

        app.toggle_stopwatch();
        app.tracker.clock().advance_secs(3);
        app.tick();
        assert_eq!(app.tracker.task(id).unwrap().current_duration(), before + 3);
    }

    #[test]
    fn test_edit_minutes_prefills_and_submits() {
        let mut app = create_test_app();
        app.selected_index = 1;
        app.start_edit_minutes();
        assert_eq!(app.ui_mode, UiMode::EditingMinutes);
        assert_eq!(app.input, "20");

        app.input_backspace();
        app.input_backspace();
        app.input_add_char('5');
        app.submit_input();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_task().unwrap().current_duration(), 300);
    }

    #[test]
    fn test_new_unit_via_input() {
        let mut app = create_test_app();
        app.start_new_unit();
        for c in "15".chars() {
            app.input_add_char(c);
        }
        app.submit_input();
        assert_eq!(app.current_unit().map(|u| u.round()), Some(15));

        app.start_new_unit();
        app.input_add_char('x');
        app.submit_input();
        assert_eq!(app.current_unit().map(|u| u.round()), Some(15));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_delete_task_needs_confirmation() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();

        app.request_delete_task();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        app.cancel_delete();
        assert!(app.tracker.task(id).is_some());

        app.request_delete_task();
        app.confirm_delete();
        assert!(app.tracker.task(id).is_none());
        assert_eq!(app.task_ids().len(), 1);
    }

    #[test]
    fn test_delete_unit_moves_to_next_unit() {
        let tracker = Tracker::new(TaskStore::default(), ManualClock::new());
        let mut app = AppState::new(tracker, TestRecordStore::default(), &Settings::default());
        app.tracker.create_unit(3).unwrap();
        app.tracker.create_unit(4).unwrap();

        app.request_delete_unit();
        app.confirm_delete();
        assert_eq!(app.current_unit().map(|u| u.round()), Some(3));
    }

    #[test]
    fn test_cycle_status_and_filter() {
        let mut app = create_test_app();
        app.selected_index = 1;
        app.cycle_status();
        assert_eq!(app.selected_task().unwrap().status(), TaskStatus::Completed);

        app.cycle_type_filter();
        assert_eq!(app.test_filter.test_type, Some(TestType::Curriculum));
        assert!(app.table_tests().iter().all(|t| t.test_type == TestType::Curriculum));
        app.cycle_type_filter();
        app.cycle_type_filter();
        app.cycle_type_filter();
        assert_eq!(app.test_filter.test_type, None);
        assert_eq!(app.table_tests().len(), 20);
    }

    #[test]
    fn test_set_status_directly() {
        let mut app = create_test_app();
        app.selected_index = 1;
        app.set_status(TaskStatus::NotStarted);
        assert_eq!(app.selected_task().unwrap().status(), TaskStatus::NotStarted);
        app.set_status(TaskStatus::Completed);
        assert_eq!(app.selected_task().unwrap().status(), TaskStatus::Completed);
        assert_eq!(app.status_message.as_deref(), Some("Status: 完了"));
    }

    #[test]
    fn test_select_test_for_details() {
        let mut app = create_test_app();
        let newest = app.table_tests()[0].id.clone();
        assert_eq!(app.selected_test().map(|t| t.id.clone()), Some(newest));

        app.move_test_selection_up();
        assert_eq!(app.selected_test, 0);
        for _ in 0..30 {
            app.move_test_selection_down();
        }
        assert_eq!(app.selected_test, 19);

        // Narrowing the table pulls the cursor back in range
        app.cycle_type_filter();
        let count = app.table_tests().len();
        assert_eq!(app.selected_test, count - 1);
        assert!(app.selected_test().is_some());
    }

    #[test]
    fn test_edit_date_range() {
        let mut app = create_test_app();
        let bounds = app.tests.date_bounds();

        app.start_edit_range();
        assert_eq!(app.ui_mode, UiMode::EditingRange);
        let (start, end) = bounds.unwrap();
        assert_eq!(app.input, format_date_range(start, end));

        app.input = "2025/11/01 ~ 2025/12/31".to_string();
        app.submit_input();
        let from = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(app.test_filter.date_range, Some((from, to)));
        assert!(app.table_tests().iter().all(|t| t.date >= from && t.date <= to));

        // A half-typed range is refused and the filter stays put
        app.start_edit_range();
        app.input = "2025/01/01".to_string();
        app.submit_input();
        assert_eq!(app.test_filter.date_range, Some((from, to)));
        assert!(app.status_message.is_some());

        app.start_edit_range();
        app.input.clear();
        app.submit_input();
        assert_eq!(app.test_filter.date_range, bounds);
        assert_eq!(app.table_tests().len(), 20);
    }

    #[test]
    fn test_chart_keys_toggle() {
        let mut app = create_test_app();
        app.toggle_chart_key(ChartKey::Total);
        assert_eq!(app.chart_keys, vec![ChartKey::Total]);

        app.toggle_chart_key(ChartKey::Math);
        assert_eq!(app.chart_keys, vec![ChartKey::Total, ChartKey::Math]);
        let points = app.chart_points();
        assert_eq!(points.len(), 20);
        assert!(points.windows(2).all(|w| w[0].full_date <= w[1].full_date));

        app.toggle_chart_key(ChartKey::Total);
        assert_eq!(app.chart_keys, vec![ChartKey::Math]);
    }
}
