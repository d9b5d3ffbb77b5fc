//! Slash-command completion.
//!
//! Maps the text typed so far to an ordered list of candidates: top-level
//! commands while the first word is being typed, then subcommands and long
//! options of the resolved command. Candidates are recomputed on every call
//! and always come out in registry declaration order.

use std::sync::Arc;

use crate::registry::{CommandDescriptor, CommandRegistry, OptionDescriptor};

/// Marker character that distinguishes a command from free text.
pub const DEFAULT_MARKER: char = '/';

/// The line being edited and the cursor position (byte offset) within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub raw_text: String,
    pub cursor_position: usize,
}

impl InputState {
    /// Input with the cursor at the end of the line.
    pub fn new(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            cursor_position: raw_text.len(),
        }
    }

    pub fn with_cursor(raw_text: &str, cursor_position: usize) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            cursor_position,
        }
    }

    /// Text left of the cursor, clamped to the line and to a char boundary.
    pub fn text_before_cursor(&self) -> &str {
        let mut pos = self.cursor_position.min(self.raw_text.len());
        while !self.raw_text.is_char_boundary(pos) {
            pos -= 1;
        }
        &self.raw_text[..pos]
    }
}

/// One suggestion for the text currently being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Name as declared, original casing.
    pub display_text: String,
    /// Replacement for everything left of the cursor, marker included.
    pub insertion_text: String,
    /// Description shown next to the candidate.
    pub meta_text: String,
}

#[derive(Debug, Clone)]
pub struct CompletionEngine {
    registry: Arc<CommandRegistry>,
    marker: char,
}

impl CompletionEngine {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            marker: DEFAULT_MARKER,
        }
    }

    #[must_use]
    pub const fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub const fn marker(&self) -> char {
        self.marker
    }

    /// Candidates for `input`. An empty list means "nothing matches", never an error.
    pub fn complete(&self, input: &InputState) -> Vec<CompletionCandidate> {
        let text = input.text_before_cursor();

        // Free text is never "corrected" into a command.
        let Some(body) = text.strip_prefix(self.marker) else {
            return Vec::new();
        };

        match body.find(char::is_whitespace) {
            None => self.complete_commands(body),
            Some(split) => {
                let (command_fragment, remainder) = body.split_at(split);
                match self.registry.lookup_ignore_case(command_fragment) {
                    Some(command) => self.complete_arguments(command, remainder),
                    None => Vec::new(),
                }
            }
        }
    }

    /// Replacement line when exactly one candidate matches the whole of `line`.
    ///
    /// The interactive loop submits this instead of the raw text, so `/c`
    /// behaves as `/config` when `config` is the only command starting with `c`.
    /// A bare marker never names a command, whatever the registry holds.
    pub fn auto_accept(&self, line: &str) -> Option<String> {
        if line
            .strip_prefix(self.marker)
            .is_some_and(|body| body.trim().is_empty())
        {
            return None;
        }
        match self.complete(&InputState::new(line)).as_slice() {
            [only] if only.insertion_text != line => Some(only.insertion_text.clone()),
            _ => None,
        }
    }

    fn complete_commands(&self, fragment: &str) -> Vec<CompletionCandidate> {
        self.registry
            .list_commands()
            .iter()
            .filter(|cmd| starts_with_ignore_case(&cmd.name, fragment))
            .map(|cmd| CompletionCandidate {
                display_text: cmd.name.clone(),
                insertion_text: format!("{}{}", self.marker, cmd.name),
                meta_text: cmd.description.clone(),
            })
            .collect()
    }

    fn complete_arguments(
        &self,
        command: &CommandDescriptor,
        remainder: &str,
    ) -> Vec<CompletionCandidate> {
        let mut committed: Vec<&str> = remainder.split_whitespace().collect();
        let current = if remainder.ends_with(char::is_whitespace) {
            ""
        } else {
            committed.pop().unwrap_or_default()
        };

        // Everything typed before the current token, with the command name canonicalized.
        let stem = format!(
            "{}{}{}",
            self.marker,
            command.name,
            &remainder[..remainder.len() - current.len()]
        );

        let subcommand = committed
            .first()
            .and_then(|token| command.find_subcommand(token));
        let options: &[OptionDescriptor] =
            subcommand.map_or(&command.options, |sub| &sub.options);

        // The current token is the value of the preceding option.
        let awaiting_value = committed.last().is_some_and(|prev| {
            !prev.contains('=')
                && options
                    .iter()
                    .any(|opt| opt.takes_value && opt.matches_token(prev))
        });
        if awaiting_value {
            return Vec::new();
        }

        if current.starts_with("--") {
            return options
                .iter()
                .filter(|opt| starts_with_ignore_case(&opt.long_form, current))
                .filter(|opt| !committed.iter().any(|token| opt.matches_token(token)))
                .map(|opt| CompletionCandidate {
                    display_text: opt.long_form.clone(),
                    insertion_text: format!("{stem}{}", opt.long_form),
                    meta_text: opt.description.clone(),
                })
                .collect();
        }

        if current.starts_with('-') || !committed.is_empty() {
            return Vec::new();
        }

        command
            .subcommands
            .iter()
            .filter(|sub| starts_with_ignore_case(&sub.name, current))
            .map(|sub| CompletionCandidate {
                display_text: sub.name.clone(),
                insertion_text: format!("{stem}{}", sub.name),
                meta_text: sub.description.clone(),
            })
            .collect()
    }
}

fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}
