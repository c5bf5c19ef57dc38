//! Suggestion dropdown widget.
//!
//! Drawn as an overlay over whatever sits beneath the field. Shows a window
//! of the suggestion list starting at the field's scroll offset, with a
//! scrollbar when the list does not fit.

use crate::field::max_scroll;
use crate::tui::layout::inner;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Widget,
    },
};

/// Suggestion list overlay.
pub struct SuggestionList<'a> {
    items: &'a [&'a str],
    highlight: usize,
    scroll: usize,
}

impl<'a> SuggestionList<'a> {
    /// Creates a new suggestion list widget.
    pub fn new(items: &'a [&'a str], highlight: usize, scroll: usize) -> Self {
        Self {
            items,
            highlight,
            scroll,
        }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue));
        let inner_area = inner(area);
        block.render(area, buf);

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        if self.items.is_empty() {
            Paragraph::new("No matches")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner_area, buf);
            return;
        }

        let viewport = inner_area.height as usize;
        let scroll = self.scroll.min(max_scroll(self.items.len(), viewport));

        for (row, (index, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(scroll)
            .take(viewport)
            .enumerate()
        {
            let style = if index == self.highlight {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line_area = Rect::new(inner_area.x, inner_area.y + row as u16, inner_area.width, 1);
            buf.set_style(line_area, style);
            Paragraph::new(Line::from(Span::styled(format!(" {item}"), style)))
                .render(line_area, buf);
        }

        if self.items.len() > viewport {
            let mut state = ScrollbarState::new(self.items.len().saturating_sub(viewport))
                .position(scroll);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(area, buf, &mut state);
        }
    }
}
