//! Headless mode for scripted testing and automation.
//!
//! Runs the TUI against an in-memory terminal, executing scripted events and
//! capturing the rendered screen for verification.

mod events;
mod output;

pub use events::{Assertion, ClickTarget, Event, EventParser};
pub use output::{HeadlessOutput, ScreenRenderer};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{LabelError, Result};
use crate::tui::app::App;
use crate::tui::layout::HitTarget;
use crate::tui::{build_app, ui};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<PathBuf>,
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(LabelError::config)?;
        let output_format = cli.parse_output_format().map_err(LabelError::config)?;

        Ok(Self {
            width,
            height,
            output_format,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            output_format: OutputFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Screen lines for JSON output.
    pub screen_lines: Vec<String>,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// The failed assertions, as written in the script.
    pub failures: Vec<String>,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// Frame captures (for frames output mode).
    pub frames: Vec<Frame>,
}

/// Snapshot of application state for JSON output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeadlessState {
    /// Current field text.
    pub input_text: String,
    /// Cursor position (character index).
    pub cursor: usize,
    /// Whether the suggestion list is shown.
    pub dropdown_visible: bool,
    /// Which control has focus.
    pub focus: String,
    /// Suggestions for the current text.
    pub suggestions: Vec<String>,
    /// Number of suggestions.
    pub suggestion_count: usize,
    /// Highlighted suggestion while the list is shown.
    pub highlighted: Option<String>,
    /// Whether the app is still running.
    pub running: bool,
}

impl HeadlessState {
    fn from_app(app: &App) -> Self {
        let suggestions: Vec<String> = app
            .field
            .suggestions()
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            input_text: app.field.input.text.clone(),
            cursor: app.field.input.cursor,
            dropdown_visible: app.field.dropdown_visible,
            focus: format!("{:?}", app.focus()),
            suggestion_count: suggestions.len(),
            suggestions,
            highlighted: app.field.highlighted_suggestion().map(String::from),
            running: app.running,
        }
    }
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    /// Screen content.
    pub screen: String,
}

/// Runs the TUI in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    events: Vec<Event>,
    frames: Vec<Frame>,
    start_time: Instant,
    assertions_passed: usize,
    assertions_failed: usize,
    failures: Vec<String>,
}

impl HeadlessRunner {
    /// Creates a new headless runner driving the given app.
    pub fn new(config: HeadlessConfig, app: App) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend)
            .map_err(|e| LabelError::internal(format!("Failed to create test terminal: {e}")))?;

        Ok(Self {
            config,
            terminal,
            app,
            events: Vec::new(),
            frames: Vec::new(),
            start_time: Instant::now(),
            assertions_passed: 0,
            assertions_failed: 0,
            failures: Vec::new(),
        })
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        let parser = EventParser::new();
        self.events = parser.parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin when the path is "-".
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| LabelError::script(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path).map_err(|e| {
                LabelError::script(format!("Failed to read script file {}: {e}", path))
            })?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        self.start_time = Instant::now();

        // The initial draw also tells the app its screen size
        self.capture_frame(None)?;

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            let event_str = event.to_string();
            debug!(event = %event_str, "headless event");

            let keep_going = self.execute(&event, &event_str).await?;
            events_executed += 1;

            self.draw()?;

            if self.config.output_format == OutputFormat::Frames {
                self.capture_frame(Some(event_str))?;
            }

            if !keep_going || !self.app.running {
                break;
            }
        }

        self.draw()?;
        let screen = self.render_screen();
        let screen_lines = screen.lines().map(String::from).collect();

        Ok(HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: self.start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            failures: self.failures,
            state: HeadlessState::from_app(&self.app),
            frames: self.frames,
        })
    }

    /// Executes one event. Returns false when the run should stop.
    async fn execute(&mut self, event: &Event, event_str: &str) -> Result<bool> {
        match event {
            Event::Key(key) => {
                self.app.handle_event(crate::tui::Event::Key(*key));
            }
            Event::Type(text) => {
                for c in text.chars() {
                    let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                    self.app.handle_event(crate::tui::Event::Key(key));
                }
            }
            Event::Click(target) => match self.resolve_click(target) {
                Some(position) => self.app.click(position),
                None => warn!(click = %target, "Click target is not on screen; skipped"),
            },
            Event::Scroll(delta) => {
                self.app.scroll_list(*delta);
            }
            Event::Wait(duration) => {
                tokio::time::sleep(*duration).await;
            }
            Event::Resize(w, h) => {
                self.terminal.backend_mut().resize(*w, *h);
                self.app.handle_event(crate::tui::Event::Resize(*w, *h));
            }
            Event::Snapshot(name) => {
                debug!(name = %name, "snapshot");
            }
            Event::Assert(assertion) => {
                let screen = self.render_screen();
                if assertion.check(&screen, &self.app) {
                    self.assertions_passed += 1;
                } else {
                    warn!(assertion = %event_str, "Assertion failed");
                    self.assertions_failed += 1;
                    self.failures.push(event_str.to_string());
                    if self.config.fail_fast {
                        return Ok(false);
                    }
                }
            }
        }

        Ok(true)
    }

    /// Finds the screen cell a scripted click should land on.
    fn resolve_click(&self, target: &ClickTarget) -> Option<Position> {
        let layout = self.app.layout();
        let field = &self.app.field;

        match target {
            ClickTarget::Field => Some(center(layout.field)),
            ClickTarget::Print => {
                // Prefer a cell the overlay leaves visible
                let button = layout.button;
                (button.top()..button.bottom())
                    .flat_map(|y| (button.left()..button.right()).map(move |x| Position::new(x, y)))
                    .find(|&pos| layout.hit_test(pos, field) == HitTarget::Print)
                    .or_else(|| Some(center(button)))
            }
            ClickTarget::List => layout
                .dropdown
                .map(|rect| Position::new(rect.x, rect.y + rect.height / 2)),
            ClickTarget::Outside => Some(Position::new(layout.area.x, layout.area.y)),
            ClickTarget::Item(name) => {
                let index = field
                    .suggestions()
                    .iter()
                    .position(|s| s.eq_ignore_ascii_case(name))?;
                layout.item_position(index, field)
            }
            ClickTarget::At(x, y) => Some(Position::new(*x, *y)),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        let completed = self
            .terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| LabelError::internal(format!("Failed to render: {e}")))?;
        let area = completed.area;
        self.app.set_screen(area);
        Ok(())
    }

    fn render_screen(&self) -> String {
        ScreenRenderer::render(self.terminal.backend().buffer())
    }

    fn capture_frame(&mut self, event: Option<String>) -> Result<()> {
        self.draw()?;

        let screen = self.render_screen();
        let number = self.frames.len();
        self.frames.push(Frame {
            number,
            event,
            screen,
        });

        Ok(())
    }
}

fn center(rect: Rect) -> Position {
    Position::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
}

/// Runs headless mode from CLI arguments. Returns the process exit code.
pub async fn run_headless(cli: &Cli, config: &Config) -> Result<i32> {
    cli.validate_headless().map_err(LabelError::config)?;

    let headless_config = HeadlessConfig::from_cli(cli)?;
    let app = build_app(config)?;
    let mut runner = HeadlessRunner::new(headless_config.clone(), app)?;

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output_str = HeadlessOutput::new(headless_config.output_format).format(&result);

    if let Some(ref path) = headless_config.output_file {
        std::fs::write(path, &output_str)
            .map_err(|e| LabelError::internal(format!("Failed to write output file: {e}")))?;
    } else {
        print!("{}", output_str);
    }

    if result.assertions_failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
