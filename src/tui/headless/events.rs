//! Event DSL parser for headless mode.
//!
//! Parses event strings like "key:enter", "type:fo", "click:item:Food" into
//! executable events.

use crate::error::{LabelError, Result};
use crate::tui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::time::Duration;

/// An assertion to check against the screen or state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Screen contains text (case-insensitive).
    Contains(String),
    /// Screen contains text (case-sensitive).
    ContainsExact(String),
    /// Screen does not contain text.
    NotContains(String),
    /// Screen matches regex pattern.
    Matches(String),
    /// State field equals value.
    StateEquals { field: String, value: String },
    /// State field comparison (>=, <=, >, <).
    StateCompare {
        field: String,
        op: String,
        value: String,
    },
}

impl Assertion {
    /// Checks the assertion against the screen and app state.
    pub fn check(&self, screen: &str, app: &App) -> bool {
        match self {
            Self::Contains(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::ContainsExact(text) => screen.contains(text),
            Self::NotContains(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::Matches(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(screen))
                .unwrap_or(false),
            Self::StateEquals { field, value } => {
                let actual = get_state_field(app, field);
                actual.as_deref() == Some(value.as_str())
            }
            Self::StateCompare { field, op, value } => {
                let actual = get_state_field(app, field);
                compare_values(actual.as_deref(), op, value)
            }
        }
    }
}

/// Gets a state field value from the app.
fn get_state_field(app: &App, field: &str) -> Option<String> {
    match field {
        "focus" => Some(format!("{:?}", app.focus())),
        "input_text" => Some(app.field.input.text.clone()),
        "cursor" => Some(app.field.input.cursor.to_string()),
        "dropdown_visible" => Some(app.field.dropdown_visible.to_string()),
        "suggestion_count" => Some(app.field.suggestions().len().to_string()),
        "suggestions" => Some(app.field.suggestions().join("|")),
        "highlighted" => Some(
            app.field
                .highlighted_suggestion()
                .unwrap_or_default()
                .to_string(),
        ),
        "running" => Some(app.running.to_string()),
        _ => None,
    }
}

/// Compares values using the given operator.
fn compare_values(actual: Option<&str>, op: &str, expected: &str) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    if let (Ok(a), Ok(e)) = (actual.parse::<i64>(), expected.parse::<i64>()) {
        return match op {
            ">=" => a >= e,
            "<=" => a <= e,
            ">" => a > e,
            "<" => a < e,
            "=" | "==" => a == e,
            _ => false,
        };
    }

    match op {
        "=" | "==" => actual == expected,
        _ => false,
    }
}

/// Where a scripted click lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The text field.
    Field,
    /// A visible cell of the Print button.
    Print,
    /// The dropdown border.
    List,
    /// A cell that is neither field, list nor button.
    Outside,
    /// A suggestion row by its text (case-insensitive).
    Item(String),
    /// An absolute screen cell.
    At(u16, u16),
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Print => write!(f, "print"),
            Self::List => write!(f, "list"),
            Self::Outside => write!(f, "outside"),
            Self::Item(name) => write!(f, "item:{}", name),
            Self::At(x, y) => write!(f, "{}:{}", x, y),
        }
    }
}

/// A parsed event that can be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Type text (expands to one key press per character).
    Type(String),
    /// A left click.
    Click(ClickTarget),
    /// Mouse wheel over the dropdown (negative is up).
    Scroll(isize),
    /// Wait for a duration.
    Wait(Duration),
    /// Resize the terminal.
    Resize(u16, u16),
    /// Take a named snapshot.
    Snapshot(String),
    /// Assert something about the screen or state.
    Assert(Assertion),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => {
                let mut parts = Vec::new();
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    parts.push("ctrl");
                }
                if key.modifiers.contains(KeyModifiers::ALT) {
                    parts.push("alt");
                }
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    parts.push("shift");
                }
                let key_name = key_code_to_string(&key.code);
                parts.push(&key_name);
                write!(f, "key:{}", parts.join("+"))
            }
            Self::Type(text) => write!(f, "type:{}", text),
            Self::Click(target) => write!(f, "click:{}", target),
            Self::Scroll(delta) => {
                let direction = if *delta < 0 { "up" } else { "down" };
                write!(f, "scroll:{}", direction)
            }
            Self::Wait(d) => write!(f, "wait:{}ms", d.as_millis()),
            Self::Resize(w, h) => write!(f, "resize:{}x{}", w, h),
            Self::Snapshot(name) => write!(f, "snapshot:{}", name),
            Self::Assert(a) => match a {
                Assertion::Contains(t) => write!(f, "assert:contains:{}", t),
                Assertion::ContainsExact(t) => write!(f, "assert:contains-exact:{}", t),
                Assertion::NotContains(t) => write!(f, "assert:not-contains:{}", t),
                Assertion::Matches(p) => write!(f, "assert:matches:{}", p),
                Assertion::StateEquals { field, value } => {
                    write!(f, "assert:state:{}={}", field, value)
                }
                Assertion::StateCompare { field, op, value } => {
                    write!(f, "assert:state:{}{}{}", field, op, value)
                }
            },
        }
    }
}

fn key_code_to_string(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => "unknown".to_string(),
    }
}

/// Parser for the event DSL.
#[derive(Debug, Default)]
pub struct EventParser;

impl EventParser {
    /// Creates a new event parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses all events from an input string.
    /// Supports comma-separated and newline-separated events.
    pub fn parse_all(&self, input: &str) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for line in input.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            for part in line.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }

                events.push(self.parse_one(part)?);
            }
        }

        Ok(events)
    }

    /// Parses a single event string.
    pub fn parse_one(&self, input: &str) -> Result<Event> {
        let input = input.trim();

        let (event_type, value) = match input.split_once(':') {
            Some((t, v)) => (t.trim().to_lowercase(), v.trim()),
            None => {
                return Err(LabelError::script(format!(
                    "Invalid event syntax: '{}'. Expected format: type:value",
                    input
                )));
            }
        };

        match event_type.as_str() {
            "key" => self.parse_key(value),
            "type" => Ok(Event::Type(value.to_string())),
            "click" => self.parse_click(value),
            "scroll" => self.parse_scroll(value),
            "wait" => self.parse_wait(value),
            "resize" => self.parse_resize(value),
            "snapshot" => Ok(Event::Snapshot(value.to_string())),
            "assert" => self.parse_assert(value),
            _ => Err(LabelError::script(format!(
                "Unknown event type: '{}'. Valid types: key, type, click, scroll, wait, resize, snapshot, assert",
                event_type
            ))),
        }
    }

    /// Parses a key event like "enter", "ctrl+c", "shift+tab".
    fn parse_key(&self, value: &str) -> Result<Event> {
        let parts: Vec<&str> = value.split('+').collect();
        let mut modifiers = KeyModifiers::empty();
        let mut key_str = "";

        for (i, part) in parts.iter().enumerate() {
            if i == parts.len() - 1 {
                key_str = part;
            } else {
                match part.to_lowercase().as_str() {
                    "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    _ => {
                        return Err(LabelError::script(format!(
                            "Unknown modifier: '{}'. Valid modifiers: ctrl, alt, shift",
                            part
                        )));
                    }
                }
            }
        }

        let mut code = self.parse_key_code(key_str)?;

        // Terminals report shift+tab as a distinct key
        if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
            code = KeyCode::BackTab;
        }

        Ok(Event::Key(KeyEvent::new(code, modifiers)))
    }

    /// Parses a key code string into a KeyCode.
    fn parse_key_code(&self, s: &str) -> Result<KeyCode> {
        let s_lower = s.to_lowercase();

        if s_lower.starts_with('f') && s_lower.len() > 1 {
            if let Ok(n) = s_lower[1..].parse::<u8>() {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
        }

        let code = match s_lower.as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bs" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        return Err(LabelError::script(format!(
                            "Unknown key: '{}'. Use single characters or named keys like enter, esc, tab, etc.",
                            s
                        )));
                    }
                }
            }
        };

        Ok(code)
    }

    /// Parses a click target like "field", "item:Food" or "12:5".
    fn parse_click(&self, value: &str) -> Result<Event> {
        let target = match value.to_lowercase().as_str() {
            "field" => ClickTarget::Field,
            "print" | "button" => ClickTarget::Print,
            "list" => ClickTarget::List,
            "outside" => ClickTarget::Outside,
            _ => {
                let item_name = value
                    .get(..5)
                    .filter(|prefix| prefix.eq_ignore_ascii_case("item:"))
                    .map(|_| &value[5..]);
                if let Some(name) = item_name {
                    ClickTarget::Item(name.trim().to_string())
                } else if let Some((x, y)) = value.split_once(':') {
                    let x: u16 = x
                        .trim()
                        .parse()
                        .map_err(|_| LabelError::script(format!("Invalid click column: '{}'", x)))?;
                    let y: u16 = y
                        .trim()
                        .parse()
                        .map_err(|_| LabelError::script(format!("Invalid click row: '{}'", y)))?;
                    ClickTarget::At(x, y)
                } else {
                    return Err(LabelError::script(format!(
                        "Unknown click target: '{}'. Valid targets: field, print, list, outside, item:NAME, X:Y",
                        value
                    )));
                }
            }
        };

        Ok(Event::Click(target))
    }

    /// Parses a wheel direction.
    fn parse_scroll(&self, value: &str) -> Result<Event> {
        match value.to_lowercase().as_str() {
            "up" => Ok(Event::Scroll(-1)),
            "down" => Ok(Event::Scroll(1)),
            _ => Err(LabelError::script(format!(
                "Invalid scroll direction: '{}'. Expected up or down",
                value
            ))),
        }
    }

    /// Parses a wait duration like "100ms", "2s", or just "100" (defaults to ms).
    fn parse_wait(&self, value: &str) -> Result<Event> {
        let value = value.trim().to_lowercase();
        let invalid = || LabelError::script(format!("Invalid duration: '{}'", value));

        let duration = if let Some(ms) = value.strip_suffix("ms") {
            Duration::from_millis(ms.parse().map_err(|_| invalid())?)
        } else if let Some(secs) = value.strip_suffix('s') {
            Duration::from_secs(secs.parse().map_err(|_| invalid())?)
        } else {
            Duration::from_millis(value.parse().map_err(|_| invalid())?)
        };

        Ok(Event::Wait(duration))
    }

    /// Parses a resize event like "120x40".
    fn parse_resize(&self, value: &str) -> Result<Event> {
        let (width, height) = crate::cli::parse_size(value).map_err(LabelError::script)?;
        Ok(Event::Resize(width, height))
    }

    /// Parses an assertion like "contains:Food" or "state:dropdown_visible=true".
    fn parse_assert(&self, value: &str) -> Result<Event> {
        let (assert_type, rest) = match value.split_once(':') {
            Some((t, r)) => (t.trim().to_lowercase(), r.trim()),
            None => {
                return Err(LabelError::script(format!(
                    "Invalid assertion syntax: '{}'. Expected assert:type:value",
                    value
                )));
            }
        };

        let assertion = match assert_type.as_str() {
            "contains" => Assertion::Contains(rest.to_string()),
            "contains-exact" => Assertion::ContainsExact(rest.to_string()),
            "not-contains" => Assertion::NotContains(rest.to_string()),
            "matches" => Assertion::Matches(rest.to_string()),
            "state" => self.parse_state_assertion(rest)?,
            _ => {
                return Err(LabelError::script(format!(
                    "Unknown assertion type: '{}'. Valid types: contains, contains-exact, not-contains, matches, state",
                    assert_type
                )));
            }
        };

        Ok(Event::Assert(assertion))
    }

    /// Parses a state assertion like "focus=Field" or "suggestion_count>=2".
    fn parse_state_assertion(&self, value: &str) -> Result<Assertion> {
        for op in &[">=", "<=", ">", "<", "="] {
            if let Some(pos) = value.find(op) {
                let field = value[..pos].trim().to_string();
                let val = value[pos + op.len()..].trim().to_string();

                if *op == "=" {
                    return Ok(Assertion::StateEquals { field, value: val });
                } else {
                    return Ok(Assertion::StateCompare {
                        field,
                        op: op.to_string(),
                        value: val,
                    });
                }
            }
        }

        Err(LabelError::script(format!(
            "Invalid state assertion: '{}'. Expected field=value or field>=value",
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CandidateSet;
    use crate::config::UiConfig;
    use crate::field::{CategoryField, FieldEvent, InputValue};

    fn app() -> App {
        App::new(
            CategoryField::new(CandidateSet::default()),
            UiConfig::default(),
        )
    }

    #[test]
    fn test_parse_key_enter() {
        let parser = EventParser::new();
        let event = parser.parse_one("key:enter").unwrap();
        assert_eq!(
            event,
            Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_parse_key_with_modifier() {
        let parser = EventParser::new();
        match parser.parse_one("key:ctrl+q").unwrap() {
            Event::Key(key) => {
                assert_eq!(key.code, KeyCode::Char('q'));
                assert!(key.modifiers.contains(KeyModifiers::CONTROL));
            }
            _ => panic!("Expected Key event"),
        }
    }

    #[test]
    fn test_parse_shift_tab_is_backtab() {
        let parser = EventParser::new();
        match parser.parse_one("key:shift+tab").unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::BackTab),
            _ => panic!("Expected Key event"),
        }
    }

    #[test]
    fn test_parse_type() {
        let parser = EventParser::new();
        assert_eq!(
            parser.parse_one("type:Fo").unwrap(),
            Event::Type("Fo".to_string())
        );
    }

    #[test]
    fn test_parse_click_targets() {
        let parser = EventParser::new();
        assert_eq!(
            parser.parse_one("click:field").unwrap(),
            Event::Click(ClickTarget::Field)
        );
        assert_eq!(
            parser.parse_one("click:Print").unwrap(),
            Event::Click(ClickTarget::Print)
        );
        assert_eq!(
            parser.parse_one("click:item:Food").unwrap(),
            Event::Click(ClickTarget::Item("Food".to_string()))
        );
        assert_eq!(
            parser.parse_one("click:Item:Food").unwrap(),
            Event::Click(ClickTarget::Item("Food".to_string()))
        );
        assert_eq!(
            parser.parse_one("click:12:5").unwrap(),
            Event::Click(ClickTarget::At(12, 5))
        );
        assert!(parser.parse_one("click:nowhere").is_err());
        assert!(parser.parse_one("click:a:b").is_err());
    }

    #[test]
    fn test_parse_scroll() {
        let parser = EventParser::new();
        assert_eq!(parser.parse_one("scroll:up").unwrap(), Event::Scroll(-1));
        assert_eq!(parser.parse_one("scroll:down").unwrap(), Event::Scroll(1));
        assert!(parser.parse_one("scroll:left").is_err());
    }

    #[test]
    fn test_parse_wait() {
        let parser = EventParser::new();
        assert_eq!(
            parser.parse_one("wait:100ms").unwrap(),
            Event::Wait(Duration::from_millis(100))
        );
        assert_eq!(
            parser.parse_one("wait:2s").unwrap(),
            Event::Wait(Duration::from_secs(2))
        );
        assert_eq!(
            parser.parse_one("wait:100").unwrap(),
            Event::Wait(Duration::from_millis(100))
        );
        assert!(parser.parse_one("wait:soon").is_err());
    }

    #[test]
    fn test_parse_resize() {
        let parser = EventParser::new();
        assert_eq!(
            parser.parse_one("resize:120x40").unwrap(),
            Event::Resize(120, 40)
        );
        assert!(parser.parse_one("resize:120").is_err());
    }

    #[test]
    fn test_parse_comma_separated() {
        let parser = EventParser::new();
        let events = parser.parse_all("key:tab,type:f,click:item:Food").unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_parse_with_comments() {
        let parser = EventParser::new();
        let script = r#"
# Focus the field
key:tab

# Pick the first suggestion
key:tab
"#;
        let events = parser.parse_all(script).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_parse_assert_state() {
        let parser = EventParser::new();
        assert_eq!(
            parser.parse_one("assert:state:dropdown_visible=true").unwrap(),
            Event::Assert(Assertion::StateEquals {
                field: "dropdown_visible".to_string(),
                value: "true".to_string(),
            })
        );
        assert_eq!(
            parser.parse_one("assert:state:suggestion_count>=2").unwrap(),
            Event::Assert(Assertion::StateCompare {
                field: "suggestion_count".to_string(),
                op: ">=".to_string(),
                value: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_invalid_event() {
        let parser = EventParser::new();
        assert!(parser.parse_one("invalid:event").is_err());
        assert!(parser.parse_one("no_colon").is_err());
        assert!(parser.parse_one("key:ctrl+nope").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let parser = EventParser::new();
        for text in ["key:ctrl+q", "key:space", "click:item:Food", "scroll:down", "type:fo"] {
            let event = parser.parse_one(text).unwrap();
            assert_eq!(event.to_string(), text);
        }
    }

    #[test]
    fn test_state_fields() {
        let mut app = app();
        app.field.apply(FieldEvent::FocusGained);
        app.field.apply(FieldEvent::Changed(InputValue::at_end("f")));

        assert_eq!(get_state_field(&app, "focus").as_deref(), Some("Field"));
        assert_eq!(get_state_field(&app, "suggestions").as_deref(), Some("Fees|Food"));
        assert_eq!(get_state_field(&app, "highlighted").as_deref(), Some("Fees"));
        assert_eq!(get_state_field(&app, "cursor").as_deref(), Some("1"));
        assert_eq!(get_state_field(&app, "bogus"), None);
    }

    #[test]
    fn test_assertion_check() {
        let app = app();
        let screen = "Category\nStart entering the name";

        assert!(Assertion::Contains("category".to_string()).check(screen, &app));
        assert!(!Assertion::ContainsExact("category".to_string()).check(screen, &app));
        assert!(Assertion::NotContains("Food".to_string()).check(screen, &app));
        assert!(Assertion::Matches(r"entering\s+the".to_string()).check(screen, &app));
        assert!(Assertion::StateEquals {
            field: "dropdown_visible".to_string(),
            value: "false".to_string(),
        }
        .check(screen, &app));
        assert!(Assertion::StateCompare {
            field: "suggestion_count".to_string(),
            op: ">".to_string(),
            value: "8".to_string(),
        }
        .check(screen, &app));
    }
}
