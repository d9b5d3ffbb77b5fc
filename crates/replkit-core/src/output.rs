//! Presentation-neutral command output.
//!
//! Commands describe what to show as a list of tagged lines; the adapter
//! decides how each kind is styled.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Heading,
    Success,
    Info,
    Warning,
    Error,
    /// Secondary text, rendered dimmed.
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

/// Result payload of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<OutputLine>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) -> &mut Self {
        self.lines.push(OutputLine {
            kind,
            text: text.into(),
        });
        self
    }

    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Plain, text)
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Heading, text)
    }

    pub fn success(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Success, text)
    }

    pub fn info(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Info, text)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Warning, text)
    }

    pub fn hint(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(LineKind::Hint, text)
    }

    /// Append every line of a multi-line block with the same kind.
    pub fn block(&mut self, kind: LineKind, text: &str) -> &mut Self {
        for line in text.lines() {
            self.push(kind, line);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Concatenated text of all lines, without styling.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
