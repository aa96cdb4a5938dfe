use crate::app::{AppState, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use levelup::stopwatch::Clock;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Title and prompt for each input mode
fn form_text(mode: UiMode) -> Option<(&'static str, &'static str)> {
    match mode {
        UiMode::EditingMinutes => Some((" Edit Time ", "Minutes studied this session:")),
        UiMode::EditingMemo => Some((" Memo ", "Memo for this session:")),
        UiMode::NewUnit => Some((" New Unit ", "Round number (creates every preset task):")),
        UiMode::EditingRange => Some((" Date Range ", "YYYY/MM/DD ~ YYYY/MM/DD (blank for all):")),
        UiMode::Normal | UiMode::ConfirmDelete => None,
    }
}

/// Render the single-line input form
pub fn render_input_form<C: Clock>(f: &mut Frame, app: &AppState<C>, area: Rect) {
    let Some((title, prompt)) = form_text(app.ui_mode) else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(prompt),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.input.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]),
        Line::raw(""),
        Line::raw("Enter to submit  ·  Esc to cancel"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_text_only_for_input_modes() {
        assert!(form_text(UiMode::EditingMinutes).is_some());
        assert!(form_text(UiMode::EditingMemo).is_some());
        assert!(form_text(UiMode::NewUnit).is_some());
        assert!(form_text(UiMode::EditingRange).is_some());
        assert!(form_text(UiMode::Normal).is_none());
        assert!(form_text(UiMode::ConfirmDelete).is_none());
    }
}
