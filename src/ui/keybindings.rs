use crate::app::Tab;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, tab: Tab) {
    let hints = match tab {
        Tab::Study => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Tab pane   "),
            Span::raw("Enter start/stop   "),
            Span::raw("s/1-3 status   "),
            Span::raw("e minutes   "),
            Span::raw("m memo   "),
            Span::raw("h save   "),
            Span::raw("n new unit   "),
            Span::raw("x/X delete   "),
            Span::raw("t tests   "),
            Span::raw("q quit"),
        ]),
        Tab::Tests => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("f type filter   "),
            Span::raw("d dates   "),
            Span::raw("0-4 chart series   "),
            Span::raw("t study   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
