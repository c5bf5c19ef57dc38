//! labelprint - a category picker with autocomplete suggestions.
//!
//! This library exposes the core modules for use in integration tests.

pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod tui;
