//! Configuration management subcommands.

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Load configuration from a YAML file
    Load {
        /// Path to config file
        #[arg(short, long)]
        file: String,
    },
    /// Save current configuration to a YAML file
    Save {
        /// Path to save config file (defaults to the active config file)
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Get a configuration value
    Get {
        /// Config key (dot notation, e.g., logging.level)
        #[arg(short, long)]
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Config key (dot notation, e.g., logging.level)
        #[arg(short, long)]
        key: String,
        /// Config value
        #[arg(short, long, allow_hyphen_values = true)]
        value: String,
    },
}
