//! Help command handler.

use anyhow::{Result, bail};

use replkit_core::{
    CommandDescriptor, CommandOutput, CommandRegistry, ExecutionContext, OptionDescriptor,
};

use crate::presentation::truncate_string;

/// Longest description shown in the command list.
const MAX_DESCRIPTION_LEN: usize = 60;

/// List every command, or describe one in detail.
pub fn execute(
    registry: &CommandRegistry,
    ctx: &ExecutionContext,
    topic: Option<&str>,
) -> Result<CommandOutput> {
    let marker = ctx.marker();
    match topic {
        None => Ok(list(registry, marker)),
        Some(topic) => {
            let name = topic.strip_prefix(marker).unwrap_or(topic);
            let Some(descriptor) = registry.lookup_ignore_case(name) else {
                bail!("Unknown command: {marker}{name}");
            };
            Ok(describe(descriptor, marker))
        }
    }
}

fn list(registry: &CommandRegistry, marker: char) -> CommandOutput {
    let width = registry
        .list_commands()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    let mut out = CommandOutput::new();
    out.heading("Available commands:");
    for command in registry.list_commands() {
        out.plain(format!(
            "  {marker}{:<width$}  {}",
            command.name,
            truncate_string(&command.description, MAX_DESCRIPTION_LEN)
        ));
    }
    out.hint(format!(
        "Type {marker}help <command> for details, or {marker}<command> --help for usage"
    ));
    out
}

fn describe(command: &CommandDescriptor, marker: char) -> CommandOutput {
    let mut out = CommandOutput::new();
    out.heading(format!("{marker}{} - {}", command.name, command.description));

    if !command.subcommands.is_empty() {
        out.plain("Subcommands:");
        let width = command
            .subcommands
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);
        for sub in &command.subcommands {
            out.plain(format!("  {:<width$}  {}", sub.name, sub.description));
            for option in &sub.options {
                out.plain(format!("      {}", option_line(option)));
            }
        }
    }

    if !command.options.is_empty() {
        out.plain("Options:");
        for option in &command.options {
            out.plain(format!("  {}", option_line(option)));
        }
    }
    out
}

fn option_line(option: &OptionDescriptor) -> String {
    let mut forms = option.long_form.clone();
    if let Some(ref short) = option.short_form {
        forms = format!("{short}, {forms}");
    }
    if option.takes_value {
        forms.push_str(" <value>");
    }
    if option.description.is_empty() {
        forms
    } else {
        format!("{forms:<24}  {}", option.description)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use replkit_core::{AppConfig, ConfigSource};

    use super::*;
    use crate::catalog::build_registry;

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(
            AppConfig::default(),
            PathBuf::from("config.yaml"),
            ConfigSource::Defaults,
            PathBuf::from("replkit.log"),
        )
    }

    #[test]
    fn lists_every_command_with_marker() {
        let registry = build_registry().unwrap();
        let text = execute(&registry, &ctx(), None).unwrap().text();
        for name in ["/help", "/quit", "/exit", "/config", "/process"] {
            assert!(text.contains(name), "{name} missing from:\n{text}");
        }
    }

    #[test]
    fn describes_a_single_command() {
        let registry = build_registry().unwrap();
        let text = execute(&registry, &ctx(), Some("/Config")).unwrap().text();
        assert!(text.starts_with("/config - Configuration management commands"));
        assert!(text.contains("-f, --file <value>"));
    }

    #[test]
    fn unknown_topic_is_an_error() {
        let registry = build_registry().unwrap();
        let err = execute(&registry, &ctx(), Some("bogus")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: /bogus");
    }
}
