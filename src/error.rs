//! Error types for labelprint.
//!
//! The category field itself cannot fail; these errors cover the shell around
//! it (config file, headless scripts, terminal setup).

use thiserror::Error;

/// Main error type for labelprint operations.
#[derive(Error, Debug)]
pub enum LabelError {
    /// Configuration errors (invalid config file, bad CLI values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Headless script errors (unknown event, malformed assertion, etc.)
    #[error("Script error: {0}")]
    Script(String),

    /// Terminal errors (raw mode, drawing, event polling)
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Internal application errors (unexpected states, file I/O, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabelError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a script error with the given message.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Script(_) => "Script Error",
            Self::Terminal(_) => "Terminal Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using LabelError.
pub type Result<T> = std::result::Result<T, LabelError>;
