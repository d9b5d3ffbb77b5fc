//! Shared CLI presentation utilities.
//!
//! This module turns command output and dispatch outcomes into styled
//! terminal text for both the REPL and one-shot mode.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no command logic
//! - Build plain [`OutputLine`](replkit_core::OutputLine)s first and style them last,
//!   so the wording stays testable without a terminal

pub mod outcome;
pub mod styles;
pub mod welcome;

// Re-export commonly used items
pub use outcome::{outcome_lines, render_cancelled, render_outcome, render_output};
pub use styles::{format_error, format_line, print_separator, truncate_string};
pub use welcome::{goodbye_message, show_goodbye, show_welcome, welcome_lines};
