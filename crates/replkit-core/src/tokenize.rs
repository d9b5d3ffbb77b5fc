//! Shell-style splitting of a command line into argument tokens.
//!
//! Quoting follows POSIX shell rules as implemented by `shell_words`: single
//! quotes are literal, double quotes allow `\"` and `\\`, a bare backslash
//! escapes the next character and a word starting with `#` begins a comment.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quote was never closed, or the line ended on a backslash.
    #[error("missing closing quote")]
    Unbalanced,
}

impl From<shell_words::ParseError> for TokenizeError {
    fn from(_: shell_words::ParseError) -> Self {
        Self::Unbalanced
    }
}

/// Split `input` on whitespace, honoring quotes and backslash escapes.
pub fn split_args(input: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(shell_words::split(input)?)
}
