//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use clap::builder::PossibleValuesParser;

use replkit_core::{ConfigOverrides, LOG_LEVELS};

use crate::commands::Commands;

/// Command-line interface definition.
///
/// Without a subcommand the interactive REPL starts; with one, the command
/// runs once and the process exits.
#[derive(Parser, Debug)]
#[command(name = "replkit")]
#[command(about = "Run commands interactively (REPL) or one at a time (CLI)")]
#[command(version, disable_help_subcommand = true)]
pub struct Cli {
    /// Path to config file (defaults to <data dir>/config.yaml)
    #[arg(short = 'c', long = "config", env = "REPLKIT_CONFIG")]
    pub config: Option<String>,

    /// Start the REPL, after running the given command if any
    #[arg(long = "repl")]
    pub repl: bool,

    /// Override the configured log level
    #[arg(long = "log-level", value_parser = PossibleValuesParser::new(LOG_LEVELS))]
    pub log_level: Option<String>,

    /// Enable verbose/debug logging (same as --log-level debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the REPL should start.
    pub const fn is_interactive(&self) -> bool {
        self.command.is_none() || self.repl
    }

    /// Configuration layer contributed by command-line flags.
    pub fn overrides(&self) -> ConfigOverrides {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else {
            self.log_level.clone()
        };
        ConfigOverrides { log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_commands::ConfigCommand;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_repl() {
        let cli = Cli::parse_from(["replkit"]);
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "replkit",
            "--config",
            "/tmp/replkit.yaml",
            "--log-level",
            "warn",
            "config",
            "show",
        ]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/replkit.yaml"));
        assert_eq!(cli.overrides().log_level.as_deref(), Some("warn"));
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::Show
            })
        );
        assert!(!cli.is_interactive());
    }

    #[test]
    fn verbose_wins_over_log_level() {
        let cli = Cli::parse_from(["replkit", "-v", "--log-level", "error", "--repl", "help"]);
        assert_eq!(cli.overrides().log_level.as_deref(), Some("debug"));
        assert!(cli.is_interactive());
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["replkit", "--log-level", "loud"]).is_err());
    }
}
