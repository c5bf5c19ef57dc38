//! State and transitions for the category autocomplete field.
//!
//! `CategoryField` is a plain state container. `CategoryField::apply` is the
//! only way its visibility and text change; rendering reads it and nothing
//! else.

use crate::category::CandidateSet;
use tracing::debug;

/// Text content of the field plus a cursor position.
///
/// The cursor is a character index in `0..=text.chars().count()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValue {
    /// Current text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputValue {
    /// Creates an empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value with the cursor placed after the last character.
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Number of characters in the text.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of the given character index.
    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns false at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Deletes the character at the cursor. Returns false at the end.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Moves the cursor to the start of the text.
    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    /// Moves the cursor to the end of the text.
    pub fn move_end(&mut self) -> bool {
        let end = self.len();
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }
}

/// Something that happened to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The field received input focus.
    FocusGained,
    /// The field lost input focus to another control.
    FocusLost,
    /// The field was pressed while it already had focus.
    Press,
    /// The user edited the value (text or cursor).
    Changed(InputValue),
    /// A suggestion was chosen from the list.
    Select(String),
    /// The done/submit action.
    Submit,
    /// A click landed outside both the field and the list.
    OutsideClick,
    /// A click landed inside the list but not on an item.
    ListClick,
    /// Moves the keyboard highlight within the list.
    MoveHighlight { delta: isize, viewport: usize },
    /// Scrolls the list viewport without moving the highlight.
    ScrollList { delta: isize, viewport: usize },
}

/// The category autocomplete field.
#[derive(Debug, Clone)]
pub struct CategoryField {
    candidates: CandidateSet,
    /// Current input value.
    pub input: InputValue,
    /// Whether the suggestion list is shown.
    pub dropdown_visible: bool,
    /// Whether the field has input focus.
    pub focused: bool,
    /// Highlighted row in the suggestion list.
    pub highlight: usize,
    /// First suggestion row shown in the list viewport.
    pub scroll: usize,
}

impl CategoryField {
    /// Creates an empty, unfocused field with the dropdown closed.
    pub fn new(candidates: CandidateSet) -> Self {
        Self {
            candidates,
            input: InputValue::new(),
            dropdown_visible: false,
            focused: false,
            highlight: 0,
            scroll: 0,
        }
    }

    /// Returns the candidate set.
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Suggestions for the current text, whether or not the list is shown.
    pub fn suggestions(&self) -> Vec<&str> {
        self.candidates.suggestions(&self.input.text)
    }

    /// The highlighted suggestion, if the list is shown and non-empty.
    pub fn highlighted_suggestion(&self) -> Option<&str> {
        if !self.dropdown_visible {
            return None;
        }
        self.suggestions().get(self.highlight).copied()
    }

    /// Applies an event to the field state.
    pub fn apply(&mut self, event: FieldEvent) {
        debug!(?event, "field event");

        match event {
            FieldEvent::FocusGained | FieldEvent::Press => {
                self.focused = true;
                self.open();
            }
            FieldEvent::FocusLost => {
                self.focused = false;
                self.dropdown_visible = false;
            }
            FieldEvent::Changed(value) => {
                self.input = value;
                self.open();
            }
            FieldEvent::Select(suggestion) => {
                self.input = InputValue::at_end(suggestion);
                self.dropdown_visible = false;
                self.reset_list();
            }
            FieldEvent::Submit | FieldEvent::OutsideClick => {
                self.dropdown_visible = false;
                self.focused = false;
            }
            FieldEvent::ListClick => {}
            FieldEvent::MoveHighlight { delta, viewport } => {
                if !self.dropdown_visible {
                    self.open();
                    return;
                }
                let count = self.suggestions().len();
                if count == 0 {
                    return;
                }
                self.highlight = offset(self.highlight, delta, count - 1);
                self.keep_highlight_visible(viewport);
            }
            FieldEvent::ScrollList { delta, viewport } => {
                if !self.dropdown_visible {
                    return;
                }
                let viewport = viewport.max(1);
                let count = self.suggestions().len();
                self.scroll = offset(self.scroll, delta, max_scroll(count, viewport));

                // The highlight stays inside the window
                let last_visible = (self.scroll + viewport).min(count).saturating_sub(1);
                self.highlight = self.highlight.clamp(self.scroll, last_visible.max(self.scroll));
            }
        }
    }

    fn open(&mut self) {
        self.dropdown_visible = true;
        self.reset_list();
    }

    fn reset_list(&mut self) {
        self.highlight = 0;
        self.scroll = 0;
    }

    fn keep_highlight_visible(&mut self, viewport: usize) {
        let viewport = viewport.max(1);
        if self.highlight < self.scroll {
            self.scroll = self.highlight;
        } else if self.highlight >= self.scroll + viewport {
            self.scroll = self.highlight + 1 - viewport;
        }
    }
}

/// Largest first-row offset that still fills a viewport of `viewport` rows.
pub fn max_scroll(count: usize, viewport: usize) -> usize {
    count.saturating_sub(viewport.max(1))
}

/// Adds a signed delta to `value`, clamped to `0..=max`.
fn offset(value: usize, delta: isize, max: usize) -> usize {
    let moved = if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    };
    moved.min(max)
}
