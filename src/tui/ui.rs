//! UI rendering for the TUI.
//!
//! `render` is a pure function of `App`: it never mutates state.

use super::app::{App, Focus};
use super::layout::ScreenLayout;
use super::widgets::{button, dropdown, header, input};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints shown in the footer.
const FOOTER_HINT: &str = " Tab: accept/next  ↑↓: choose  Enter: done  Esc: dismiss  Ctrl+Q: quit";

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = ScreenLayout::compute(frame.area(), &app.field, app.ui.dropdown_max_height);

    render_header(frame, layout.header, app);
    render_label(frame, layout.label);
    render_field(frame, layout.field, app);
    render_button(frame, layout.button, app);
    render_footer(frame, layout.footer);

    // Overlay last so it sits above the button
    if let Some(area) = layout.dropdown {
        render_dropdown(frame, area, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(header::Header::new(app.focus()), area);
}

fn render_label(frame: &mut Frame, area: Rect) {
    let style = Style::default().add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(" Category", style))), area);
}

fn render_field(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == Focus::Field;
    let widget = input::CategoryInput::new(&app.field.input, &app.ui.placeholder, focused);
    frame.render_widget(widget, area);

    if focused {
        // Account for the left border
        let (_, column) = input::visible_window(&app.field.input, input::text_width(area));
        let cursor_x = area.x + 1 + column as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_button(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == Focus::Print;
    frame.render_widget(button::PrintButton::new(focused), area);
}

fn render_dropdown(frame: &mut Frame, area: Rect, app: &App) {
    let items = app.field.suggestions();
    let widget = dropdown::SuggestionList::new(&items, app.field.highlight, app.field.scroll);
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(FOOTER_HINT).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, area);
}
