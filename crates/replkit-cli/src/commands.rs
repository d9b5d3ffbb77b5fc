//! Main commands enum shared by the one-shot CLI and the REPL.

use clap::{Parser, Subcommand};

use crate::config_commands::ConfigCommand;

/// Commands available in both modes.
///
/// Doc comments double as the descriptions in the command catalog; keep the
/// two in sync (`catalog` has a test for it).
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show available commands
    Help {
        /// Command to describe in detail
        command: Option<String>,
    },

    /// Exit the REPL
    Quit,

    /// Exit the REPL
    Exit,

    /// Configuration management commands
    #[command(arg_required_else_help = true, disable_help_subcommand = true)]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Process an input file (example business logic)
    Process {
        /// Path to input file
        #[arg(short, long)]
        input: String,
        /// Output directory (defaults to paths.output_dir)
        #[arg(short, long)]
        output_dir: Option<String>,
    },
}

/// Parser for one line typed into the REPL, marker already stripped.
#[derive(Parser, Debug)]
#[command(name = "replkit")]
#[command(no_binary_name = true, disable_help_subcommand = true, disable_version_flag = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: Commands,
}
