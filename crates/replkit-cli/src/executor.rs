//! Executor that runs registered commands through clap and the handlers.

use std::iter;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use replkit_core::{
    CommandOutput, CommandRegistry, ExecutionContext, Executor, ExecutorError, LineKind,
};

use crate::commands::{Commands, ReplLine};
use crate::handlers;

/// Parses dispatched tokens with clap and hands them to the handlers.
#[derive(Debug, Clone)]
pub struct CliExecutor {
    registry: Arc<CommandRegistry>,
}

impl CliExecutor {
    pub const fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Run an already parsed command.
    pub fn run(&self, command: Commands, ctx: &mut ExecutionContext) -> Result<CommandOutput> {
        handlers::execute(command, &self.registry, ctx)
    }
}

impl Executor for CliExecutor {
    fn execute(
        &self,
        name: &str,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, ExecutorError> {
        let argv = iter::once(name).chain(args.iter().map(String::as_str));
        match ReplLine::try_parse_from(argv) {
            Ok(line) => self.run(line.command, ctx).map_err(ExecutorError::from),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    let mut out = CommandOutput::new();
                    out.block(LineKind::Plain, err.render().to_string().trim_end());
                    Ok(out)
                }
                _ => Err(ExecutorError::Usage(
                    err.render().to_string().trim_end().to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use replkit_core::{AppConfig, ConfigSource};

    use super::*;
    use crate::catalog::build_registry;

    fn executor() -> CliExecutor {
        CliExecutor::new(Arc::new(build_registry().unwrap()))
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(
            AppConfig::default(),
            PathBuf::from("config.yaml"),
            ConfigSource::Defaults,
            PathBuf::from("replkit.log"),
        )
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn help_flag_renders_usage_as_output() {
        let out = executor()
            .execute("config", &args(&["--help"]), &mut ctx())
            .unwrap();
        let text = out.text();
        assert!(text.contains("Usage:"));
        assert!(text.contains("Display current configuration"));
    }

    #[test]
    fn missing_subcommand_shows_help() {
        let out = executor().execute("config", &[], &mut ctx()).unwrap();
        assert!(out.text().contains("show"));
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        let err = executor()
            .execute("config", &args(&["load"]), &mut ctx())
            .unwrap_err();
        match err {
            ExecutorError::Usage(message) => assert!(message.contains("--file")),
            ExecutorError::Failed(other) => panic!("expected usage error, got {other}"),
        }
    }

    #[test]
    fn set_mutates_the_context() {
        let mut ctx = ctx();
        executor()
            .execute(
                "config",
                &args(&["set", "--key", "repl.prompt", "--value", ">> "]),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(ctx.config.repl.prompt, ">> ");
    }
}
