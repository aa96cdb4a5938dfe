pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod tests_pane;
pub mod unit_pane;

use crate::app::{AppState, Tab};
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::{create_layout, create_study_layout, create_tests_layout};
use levelup::stopwatch::Clock;
use list_pane::render_list_pane;
use modal::render_confirm_modal;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::title_style;
use tests_pane::{render_chart, render_score_details, render_test_table};
use unit_pane::render_unit_pane;

/// Main render function - draws the entire UI
pub fn render<C: Clock>(f: &mut Frame, app: &AppState<C>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area, app.tab);

    match app.tab {
        Tab::Study => {
            let study = create_study_layout(layout.content_area);
            render_unit_pane(f, app, study.units_area);
            render_list_pane(f, app, study.tasks_area);
            render_details_pane(f, app, study.details_area);
        }
        Tab::Tests => {
            let tests = create_tests_layout(layout.content_area);
            render_test_table(f, app, tests.table_area);
            render_chart(f, app, tests.chart_area);
            render_score_details(f, app, tests.scores_area);
        }
    }

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(format!(" {}", message), title_style()));
        f.render_widget(status, layout.status_area);
    }

    render_input_form(f, app, size);
    render_confirm_modal(f, app, size);
}
