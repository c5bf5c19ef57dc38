//! Application state for the TUI.
//!
//! `App` owns the category field, knows which control has focus, and turns
//! key and mouse events into `FieldEvent`s. It is the only place that
//! mutates screen state.

use super::layout::{HitTarget, ScreenLayout};
use super::Event;
use crate::config::UiConfig;
use crate::field::{CategoryField, FieldEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

/// Which control currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Field,
    Print,
}

impl Focus {
    /// Lowercase name for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Field => "field",
            Self::Print => "print",
        }
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// The category field.
    pub field: CategoryField,
    /// Whether the Print button has keyboard focus.
    pub button_focused: bool,
    /// Presentation settings.
    pub ui: UiConfig,
    /// Last known screen area, used for mouse hit-testing.
    pub screen: Rect,
}

impl App {
    /// Creates a new App instance.
    pub fn new(field: CategoryField, ui: UiConfig) -> Self {
        Self {
            running: true,
            field,
            button_focused: false,
            ui,
            screen: Rect::default(),
        }
    }

    /// Returns the control that has focus.
    pub fn focus(&self) -> Focus {
        if self.field.focused {
            Focus::Field
        } else if self.button_focused {
            Focus::Print
        } else {
            Focus::None
        }
    }

    /// Lays out the last known screen for the current state.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.screen, &self.field, self.ui.dropdown_max_height)
    }

    /// Records the area the last frame was drawn into.
    ///
    /// A new size can change the list viewport, so the scroll offset and
    /// highlight are refitted to it.
    pub fn set_screen(&mut self, area: Rect) {
        if self.screen == area {
            return;
        }
        self.screen = area;
        self.scroll_list(0);
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.set_screen(Rect::new(0, 0, width, height));
            }
            Event::Tick => {}
        }
    }

    /// The Print action. Printing is not implemented; this is a stub.
    pub fn press_print(&self) {
        debug!("Print pressed; printing is not implemented");
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c' | 'q') = key.code {
                info!("Quit requested");
                self.running = false;
            }
            return;
        }

        match self.focus() {
            Focus::Field => self.handle_field_key(key),
            Focus::Print => self.handle_button_key(key),
            Focus::None => match key.code {
                KeyCode::Tab => self.focus_field(),
                KeyCode::BackTab => self.button_focused = true,
                _ => {}
            },
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        let viewport = self.layout().dropdown_viewport();
        let mut value = self.field.input.clone();

        let edited = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                value.insert(c);
                true
            }
            KeyCode::Backspace => value.backspace(),
            KeyCode::Delete => value.delete(),
            KeyCode::Left => value.move_left(),
            KeyCode::Right => value.move_right(),
            KeyCode::Home => value.move_home(),
            KeyCode::End => value.move_end(),
            KeyCode::Up => return self.move_highlight(-1, viewport),
            KeyCode::Down => return self.move_highlight(1, viewport),
            KeyCode::PageUp => return self.move_highlight(-(viewport as isize), viewport),
            KeyCode::PageDown => return self.move_highlight(viewport as isize, viewport),
            KeyCode::Tab => {
                let highlighted = self.field.highlighted_suggestion().map(str::to_string);
                match highlighted {
                    Some(suggestion) => self.field.apply(FieldEvent::Select(suggestion)),
                    None => self.focus_button(),
                }
                return;
            }
            KeyCode::BackTab => return self.focus_button(),
            KeyCode::Enter => return self.field.apply(FieldEvent::Submit),
            KeyCode::Esc => return self.field.apply(FieldEvent::OutsideClick),
            _ => false,
        };

        if edited {
            self.field.apply(FieldEvent::Changed(value));
        }
    }

    fn handle_button_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.press_print(),
            KeyCode::Tab | KeyCode::BackTab => self.focus_field(),
            KeyCode::Esc => self.button_focused = false,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let layout = self.layout();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(position);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let over_list = layout.dropdown.is_some_and(|rect| rect.contains(position));
                if over_list {
                    let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
                    self.scroll_list(delta);
                }
            }
            _ => {}
        }
    }

    /// Routes a left click at the given screen position.
    pub fn click(&mut self, position: Position) {
        let target = self.layout().hit_test(position, &self.field);
        debug!(?target, x = position.x, y = position.y, "click");

        match target {
            HitTarget::Item(index) => {
                let suggestion = self.field.suggestions().get(index).map(|s| s.to_string());
                if let Some(suggestion) = suggestion {
                    self.field.apply(FieldEvent::Select(suggestion));
                }
            }
            HitTarget::List => self.field.apply(FieldEvent::ListClick),
            HitTarget::Field => {
                if self.field.focused {
                    self.field.apply(FieldEvent::Press);
                } else {
                    self.focus_field();
                }
            }
            // The button consumes the click: no dismissal, no focus change
            HitTarget::Print => self.press_print(),
            HitTarget::Outside => {
                self.button_focused = false;
                self.field.apply(FieldEvent::OutsideClick);
            }
        }
    }

    /// Scrolls the dropdown viewport by whole rows.
    pub fn scroll_list(&mut self, delta: isize) {
        let viewport = self.layout().dropdown_viewport();
        self.field.apply(FieldEvent::ScrollList { delta, viewport });
    }

    fn move_highlight(&mut self, delta: isize, viewport: usize) {
        self.field.apply(FieldEvent::MoveHighlight { delta, viewport });
    }

    fn focus_field(&mut self) {
        self.button_focused = false;
        self.field.apply(FieldEvent::FocusGained);
    }

    fn focus_button(&mut self) {
        self.field.apply(FieldEvent::FocusLost);
        self.button_focused = true;
    }
}
