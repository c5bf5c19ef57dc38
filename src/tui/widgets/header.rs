//! Header widget for the TUI.
//!
//! Displays the application name, version, and which control has focus.

use crate::tui::app::Focus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header {
    focus: Focus,
}

impl Header {
    /// Creates a new header widget.
    pub fn new(focus: Focus) -> Self {
        Self { focus }
    }
}

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left_text = format!(" labelprint v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        let right_text = format!(" [{}] ", self.focus.label());
        let right_width = right_text.len() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            let focus_style = Style::default().bg(Color::Blue).fg(Color::Gray);
            buf.set_string(right_x, area.y, &right_text, focus_style);
        }
    }
}
