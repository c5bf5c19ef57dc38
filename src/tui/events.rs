//! Event handling for the TUI.
//!
//! Processes keyboard, mouse and terminal events using crossterm.

use crate::error::{LabelError, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// Application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button or wheel event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick (no input within the tick rate).
    Tick,
}

impl Event {
    /// Converts a crossterm event, dropping the kinds the UI ignores.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            // Some platforms also report key releases
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Self::Mouse(mouse)),
            CrosstermEvent::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

/// Handles terminal events.
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Creates a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event.
    ///
    /// Returns `Event::Tick` if nothing useful arrives within the tick rate.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)
            .map_err(|e| LabelError::terminal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| LabelError::terminal(format!("Failed to read event: {e}")))?;
            Ok(Event::from_crossterm(event).unwrap_or(Event::Tick))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
