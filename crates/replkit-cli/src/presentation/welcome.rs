//! Welcome banner and goodbye message for the REPL.

use console::style;

use replkit_core::{ConfigSource, ExecutionContext, LineKind, OutputLine, TerminationReason};

use super::styles::{format_line, print_separator};

/// Banner lines shown when the REPL starts.
pub fn welcome_lines(ctx: &ExecutionContext) -> Vec<OutputLine> {
    let marker = ctx.marker();
    let config = match ctx.config_source {
        ConfigSource::File => ctx.config_file.display().to_string(),
        ConfigSource::Defaults => format!("{} (not found, using defaults)", ctx.config_file.display()),
    };

    let mut lines = vec![
        OutputLine {
            kind: LineKind::Heading,
            text: format!("{} v{}", ctx.config.app.name, ctx.config.app.version),
        },
        OutputLine {
            kind: LineKind::Hint,
            text: format!("Config: {config}"),
        },
        OutputLine {
            kind: LineKind::Hint,
            text: format!("Logs:   {}", ctx.log_file.display()),
        },
        OutputLine {
            kind: LineKind::Plain,
            text: String::new(),
        },
        OutputLine {
            kind: LineKind::Plain,
            text: format!("Type {marker}help to see available commands, {marker}quit to exit."),
        },
        OutputLine {
            kind: LineKind::Hint,
            text: "Tab completes commands; Ctrl-C cancels the line; Ctrl-D exits.".to_string(),
        },
    ];
    if ctx.config.agent.enabled {
        lines.push(OutputLine {
            kind: LineKind::Info,
            text: "Agent mode is on: text without the marker goes to the agent".to_string(),
        });
    }
    lines
}

pub fn show_welcome(ctx: &ExecutionContext) {
    print_separator();
    for line in welcome_lines(ctx) {
        println!("{}", format_line(&line));
    }
    print_separator();
}

pub const fn goodbye_message(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::Requested | TerminationReason::EndOfInput => "Goodbye!",
        TerminationReason::DoubleInterrupt => "Interrupted. Goodbye!",
    }
}

pub fn show_goodbye(reason: TerminationReason) {
    println!("\n{}", style(goodbye_message(reason)).cyan());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use replkit_core::AppConfig;

    use super::*;

    #[test]
    fn banner_names_app_config_and_logs() {
        let ctx = ExecutionContext::new(
            AppConfig::default(),
            PathBuf::from("/data/config.yaml"),
            ConfigSource::Defaults,
            PathBuf::from("/data/logs/replkit.log"),
        );
        let text: Vec<String> = welcome_lines(&ctx).into_iter().map(|l| l.text).collect();
        assert!(text[0].starts_with("replkit v"));
        assert!(text[1].contains("using defaults"));
        assert!(text[2].contains("replkit.log"));
        assert!(text.iter().any(|t| t.contains("/help")));
    }
}
