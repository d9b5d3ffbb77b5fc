//! Rendering of dispatch outcomes.

use replkit_core::{
    CommandOutput, DispatchOutcome, ExecutionContext, FailureKind, LineKind, OutputLine,
};

use super::styles::{format_line, print_separator};

fn line(kind: LineKind, text: impl Into<String>) -> OutputLine {
    OutputLine {
        kind,
        text: text.into(),
    }
}

/// Lines describing an outcome, before styling.
///
/// Silent outcomes (empty command, termination, blank free text) yield nothing.
pub fn outcome_lines(outcome: &DispatchOutcome, ctx: &ExecutionContext) -> Vec<OutputLine> {
    let marker = ctx.marker();
    match outcome {
        DispatchOutcome::Success(output) => output.lines.clone(),
        DispatchOutcome::NotACommand(text) if text.trim().is_empty() => Vec::new(),
        DispatchOutcome::NotACommand(text) if ctx.config.agent.enabled => vec![
            line(
                LineKind::Info,
                format!("Agent mode: Would send to LLM: {}", text.trim()),
            ),
            line(LineKind::Hint, "(Agent integration not yet implemented)"),
        ],
        DispatchOutcome::NotACommand(text) => vec![
            line(LineKind::Warning, format!("Not a command: {}", text.trim())),
            line(
                LineKind::Hint,
                format!("Commands must start with {marker}. Try: {marker}help"),
            ),
            line(
                LineKind::Hint,
                "Set agent.enabled = true to send free text to an agent",
            ),
        ],
        DispatchOutcome::EmptyCommand | DispatchOutcome::SessionTerminationRequested => Vec::new(),
        DispatchOutcome::UnknownCommand(name) => vec![
            line(LineKind::Error, format!("Unknown command: {marker}{name}")),
            line(
                LineKind::Hint,
                format!("Try: {marker}help to see available commands"),
            ),
        ],
        DispatchOutcome::CommandExecutionFailed { name, failure } => {
            let mut lines = Vec::new();
            match failure.kind {
                // clap already formats its own message, including "error:".
                FailureKind::InvalidArguments => lines.extend(
                    failure
                        .message
                        .lines()
                        .map(|text| line(LineKind::Plain, text)),
                ),
                FailureKind::MalformedInput | FailureKind::Failed | FailureKind::Panicked => {
                    lines.push(line(LineKind::Error, format!("Error: {}", failure.detail())));
                }
            }
            if failure.kind != FailureKind::MalformedInput {
                lines.push(line(
                    LineKind::Hint,
                    format!("Try: {marker}{name} --help for usage"),
                ));
            }
            lines
        }
    }
}

/// Print styled command output.
pub fn render_output(output: &CommandOutput) {
    for line in &output.lines {
        println!("{}", format_line(line));
    }
}

/// Print an outcome in the REPL, followed by a separator when anything was shown.
pub fn render_outcome(outcome: &DispatchOutcome, ctx: &ExecutionContext) {
    let lines = outcome_lines(outcome, ctx);
    if lines.is_empty() {
        return;
    }
    println!();
    for line in &lines {
        println!("{}", format_line(line));
    }
    println!();
    print_separator();
}

/// Feedback for a single Ctrl-C.
pub fn render_cancelled() {
    println!("{}", console::style("(Press Ctrl-C again or Ctrl-D to exit)").dim());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use replkit_core::{AppConfig, ConfigSource, ExecutionFailure};

    use super::*;

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(
            AppConfig::default(),
            PathBuf::from("config.yaml"),
            ConfigSource::Defaults,
            PathBuf::from("replkit.log"),
        )
    }

    fn texts(lines: &[OutputLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn silent_outcomes() {
        let ctx = ctx();
        assert!(outcome_lines(&DispatchOutcome::EmptyCommand, &ctx).is_empty());
        assert!(outcome_lines(&DispatchOutcome::SessionTerminationRequested, &ctx).is_empty());
        assert!(outcome_lines(&DispatchOutcome::NotACommand("   ".into()), &ctx).is_empty());
    }

    #[test]
    fn free_text_without_agent_explains_the_marker() {
        let lines = outcome_lines(&DispatchOutcome::NotACommand("hello".into()), &ctx());
        assert_eq!(lines[0].text, "Not a command: hello");
        assert!(lines[1].text.contains("Commands must start with /"));
    }

    #[test]
    fn free_text_with_agent_enabled() {
        let mut ctx = ctx();
        ctx.config.agent.enabled = true;
        let lines = outcome_lines(&DispatchOutcome::NotACommand("hello".into()), &ctx);
        assert_eq!(lines[0].text, "Agent mode: Would send to LLM: hello");
    }

    #[test]
    fn unknown_command_suggests_help() {
        let lines = outcome_lines(&DispatchOutcome::UnknownCommand("bogus".into()), &ctx());
        assert_eq!(
            texts(&lines),
            ["Unknown command: /bogus", "Try: /help to see available commands"]
        );
    }

    #[test]
    fn failures_include_cause_chain_and_usage_hint() {
        let outcome = DispatchOutcome::CommandExecutionFailed {
            name: "process".into(),
            failure: ExecutionFailure {
                kind: FailureKind::Failed,
                message: "Processing failed".into(),
                causes: vec!["Input file not found: x".into()],
                cause_type: "replkit_core::processor::ProcessError",
            },
        };
        assert_eq!(
            texts(&outcome_lines(&outcome, &ctx())),
            [
                "Error: Processing failed: Input file not found: x",
                "Try: /process --help for usage"
            ]
        );
    }

    #[test]
    fn malformed_input_has_no_usage_hint() {
        let outcome = DispatchOutcome::CommandExecutionFailed {
            name: "config".into(),
            failure: ExecutionFailure::new(FailureKind::MalformedInput, "unterminated double quote"),
        };
        let lines = outcome_lines(&outcome, &ctx());
        assert_eq!(texts(&lines), ["Error: unterminated double quote"]);
        assert_eq!(lines[0].kind, LineKind::Error);
    }
}
