//! Terminal styling for output lines.

use console::{Term, style};

use replkit_core::{LineKind, OutputLine};

/// Widest separator drawn, even on very wide terminals.
const MAX_SEPARATOR_WIDTH: usize = 80;

/// Style one output line for the terminal.
pub fn format_line(line: &OutputLine) -> String {
    let text = line.text.as_str();
    match line.kind {
        LineKind::Plain => text.to_string(),
        LineKind::Heading => style(text).bold().cyan().to_string(),
        LineKind::Success => format!("{} {}", style("✓").green(), style(text).green()),
        LineKind::Info => format!("{} {}", style("ℹ").cyan(), text),
        LineKind::Warning => format!("{} {}", style("⚠").yellow(), style(text).yellow()),
        LineKind::Error => format_error(text),
        LineKind::Hint => style(text).dim().to_string(),
    }
}

/// Format an error message the way every error is shown.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), style(message).red())
}

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use replkit_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a dimmed horizontal separator sized to the terminal.
pub fn print_separator() {
    let (_, columns) = Term::stdout().size();
    let width = usize::from(columns).min(MAX_SEPARATOR_WIDTH);
    println!("{}", style("─".repeat(width)).dim());
}
