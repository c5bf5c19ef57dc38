//! Headless TUI tests.

mod autocomplete_test;
mod common;
mod headless_test;
