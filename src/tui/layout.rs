//! Screen geometry.
//!
//! Rendering and mouse routing both derive their rectangles from
//! `ScreenLayout::compute`, so a click always lands on what was drawn.

use crate::field::{max_scroll, CategoryField};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Columns of padding on each side of the form.
const SIDE_PADDING: u16 = 2;

/// What a screen position lands on, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A suggestion row, by index into the full suggestion list.
    Item(usize),
    /// Inside the dropdown but not on a suggestion.
    List,
    /// The text field.
    Field,
    /// The visible part of the Print button.
    Print,
    /// Anything else.
    Outside,
}

/// Rectangles for every part of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub header: Rect,
    pub label: Rect,
    pub field: Rect,
    pub button: Rect,
    pub footer: Rect,
    /// The suggestion overlay, when the dropdown is visible.
    pub dropdown: Option<Rect>,
}

impl ScreenLayout {
    /// Lays out the screen for the given field state.
    pub fn compute(area: Rect, field: &CategoryField, max_rows: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Gap
                Constraint::Length(1), // Label
                Constraint::Length(3), // Field
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Button
                Constraint::Fill(1),   // Fill
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let field_rect = pad(rows[3]);
        let dropdown = if field.dropdown_visible {
            dropdown_rect(area, field_rect, field.suggestions().len(), max_rows)
        } else {
            None
        };

        Self {
            area,
            header: rows[0],
            label: pad(rows[2]),
            field: field_rect,
            button: pad(rows[5]),
            footer: rows[7],
            dropdown,
        }
    }

    /// Number of suggestion rows the dropdown can show at once.
    pub fn dropdown_viewport(&self) -> usize {
        self.dropdown
            .map(|rect| rect.height.saturating_sub(2).max(1) as usize)
            .unwrap_or(1)
    }

    /// Finds what the given position lands on.
    pub fn hit_test(&self, position: Position, field: &CategoryField) -> HitTarget {
        if let Some(dropdown) = self.dropdown {
            if dropdown.contains(position) {
                return self.hit_list(dropdown, position, field);
            }
        }

        if self.field.contains(position) {
            HitTarget::Field
        } else if self.button.contains(position) {
            HitTarget::Print
        } else {
            HitTarget::Outside
        }
    }

    fn hit_list(&self, dropdown: Rect, position: Position, field: &CategoryField) -> HitTarget {
        let inner = inner(dropdown);
        if !inner.contains(position) {
            return HitTarget::List;
        }

        let index = visible_scroll(field, inner) + (position.y - inner.y) as usize;
        if index < field.suggestions().len() {
            HitTarget::Item(index)
        } else {
            HitTarget::List
        }
    }

    /// Screen position of a suggestion row, if it is currently on screen.
    pub fn item_position(&self, index: usize, field: &CategoryField) -> Option<Position> {
        let inner = inner(self.dropdown?);
        let scroll = visible_scroll(field, inner);
        if index < scroll || index >= field.suggestions().len() {
            return None;
        }
        let row = (index - scroll) as u16;
        (row < inner.height).then(|| Position::new(inner.x, inner.y + row))
    }
}

/// The area inside a one-cell border.
pub fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

/// First suggestion row actually drawn in the list's inner area.
fn visible_scroll(field: &CategoryField, inner: Rect) -> usize {
    let count = field.suggestions().len();
    field.scroll.min(max_scroll(count, inner.height as usize))
}

fn pad(rect: Rect) -> Rect {
    let padding = SIDE_PADDING.min(rect.width / 4);
    Rect::new(
        rect.x + padding,
        rect.y,
        rect.width - padding * 2,
        rect.height,
    )
}

/// Places the overlay directly beneath the field, clipped to the screen.
fn dropdown_rect(area: Rect, field: Rect, count: usize, max_rows: u16) -> Option<Rect> {
    // An empty list still gets one row for the "no matches" line
    let rows = u16::try_from(count).unwrap_or(u16::MAX).clamp(1, max_rows.max(1));
    let y = field.bottom();
    let available = area.bottom().saturating_sub(y);
    let height = (rows + 2).min(available);
    if height == 0 {
        return None;
    }

    Some(Rect::new(
        field.x + 1,
        y,
        field.width.saturating_sub(2),
        height,
    ))
}
