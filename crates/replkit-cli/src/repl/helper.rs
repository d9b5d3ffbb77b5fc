//! rustyline helper backed by the completion engine.

use std::borrow::Cow;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use replkit_core::{CompletionCandidate, CompletionEngine, InputState};

/// Completion, inline hints and hint styling for the prompt.
pub struct ReplHelper {
    engine: CompletionEngine,
}

impl ReplHelper {
    pub const fn new(engine: CompletionEngine) -> Self {
        Self { engine }
    }
}

fn menu_entry(candidate: &CompletionCandidate, width: usize) -> String {
    if candidate.meta_text.is_empty() {
        candidate.display_text.clone()
    } else {
        format!(
            "{:<width$}  {}",
            candidate.display_text, candidate.meta_text
        )
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    // Insertion text covers everything before the cursor, so replacement
    // always starts at column 0.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self.engine.complete(&InputState::with_cursor(line, pos));
        let width = candidates
            .iter()
            .map(|c| c.display_text.len())
            .max()
            .unwrap_or(0);
        let pairs = candidates
            .iter()
            .map(|c| Pair {
                display: menu_entry(c, width),
                replacement: c.insertion_text.clone(),
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    /// Ghost text for the only remaining candidate.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        match self.engine.complete(&InputState::new(line)).as_slice() {
            [only] => only
                .insertion_text
                .strip_prefix(line)
                .filter(|rest| !rest.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(style(hint).dim().to_string())
    }
}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}
