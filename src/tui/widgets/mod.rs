//! TUI widgets for labelprint.
//!
//! Contains reusable UI components.

pub mod button;
pub mod dropdown;
pub mod header;
pub mod input;
