//! Text field widget for the TUI.
//!
//! A bordered single-line field that shows a placeholder while empty and
//! scrolls horizontally to keep the cursor visible.

use crate::field::InputValue;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Works out which part of the text fits in `available_width` cells.
///
/// Returns the number of characters to skip from the start of the text and
/// the cursor's column after skipping them. Both account for wide characters.
pub fn visible_window(value: &InputValue, available_width: usize) -> (usize, usize) {
    let widths: Vec<usize> = value
        .text
        .chars()
        .take(value.cursor)
        .map(|c| c.width().unwrap_or(0))
        .collect();

    let mut column: usize = widths.iter().sum();
    let mut skip = 0;
    while column > available_width && skip < widths.len() {
        column -= widths[skip];
        skip += 1;
    }

    (skip, column)
}

/// Width available for text inside the field: borders plus one cell for the cursor.
pub fn text_width(area: Rect) -> usize {
    area.width.saturating_sub(3) as usize
}

/// Category text field widget.
pub struct CategoryInput<'a> {
    value: &'a InputValue,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> CategoryInput<'a> {
    /// Creates a new text field widget.
    pub fn new(value: &'a InputValue, placeholder: &'a str, focused: bool) -> Self {
        Self {
            value,
            placeholder,
            focused,
        }
    }
}

impl Widget for CategoryInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let (skip, _) = visible_window(self.value, text_width(area));
            let visible: String = self.value.text.chars().skip(skip).collect();
            Line::from(Span::raw(visible))
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}
