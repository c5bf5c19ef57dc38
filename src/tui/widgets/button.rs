//! Print button widget.
//!
//! Always enabled. Pressing it does nothing; see `App::press_print`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Full-width action button.
pub struct PrintButton {
    focused: bool,
}

impl PrintButton {
    /// Creates a new button widget.
    pub fn new(focused: bool) -> Self {
        Self { focused }
    }
}

impl Widget for PrintButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(style);

        Paragraph::new("Print")
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
