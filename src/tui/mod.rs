//! Terminal User Interface for labelprint.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
pub mod layout;
mod ui;
pub mod widgets;

pub use app::{App, Focus};
pub use events::{Event, EventHandler};

use crate::config::Config;
use crate::error::{LabelError, Result};
use crate::field::CategoryField;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::info;

/// Builds the initial application state from configuration.
pub fn build_app(config: &Config) -> Result<App> {
    let candidates = config.candidates()?;
    info!("Loaded {} categories", candidates.len());
    Ok(App::new(CategoryField::new(candidates), config.ui.clone()))
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new(config: &Config) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let event_handler = EventHandler::with_tick_rate(config.ui.tick_rate());

        Ok(Self {
            terminal,
            event_handler,
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| LabelError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| LabelError::terminal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| LabelError::terminal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| LabelError::terminal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| LabelError::terminal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| LabelError::terminal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop until the user quits.
    pub fn run(&mut self, mut app: App) -> Result<()> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        while app.running {
            let completed = self
                .terminal
                .draw(|frame| ui::render(frame, &app))
                .map_err(|e| LabelError::terminal(format!("Failed to draw: {e}")))?;
            app.set_screen(completed.area);

            let event = self.event_handler.next()?;
            app.handle_event(event);
        }

        let _ = panic::take_hook();
        info!("Exiting with category {:?}", app.field.input.text);

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive TUI.
pub fn run(config: &Config) -> Result<()> {
    let app = build_app(config)?;
    let mut tui = Tui::new(config)?;
    tui.run(app)
}
