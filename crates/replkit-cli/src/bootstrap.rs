//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the CLI adapter is wired together:
//! - Configuration layering (defaults < config file < command-line flags)
//! - The command registry and the executor that runs its commands
//! - The execution context handed to every command
//!
//! Both the REPL and one-shot mode receive the same [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use replkit_core::paths::{default_config_path, normalize_user_path, resolve_in_data_root};
use replkit_core::{
    AppConfig, CommandRegistry, CompletionEngine, ConfigOverrides, ConfigSource, Dispatcher,
    ExecutionContext, validate_config,
};

use crate::catalog::build_registry;
use crate::error::CliError;
use crate::executor::CliExecutor;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Config file to read; a missing file means built-in defaults.
    pub config_file: PathBuf,
    /// Values from command-line flags, applied on top of the file.
    pub overrides: ConfigOverrides,
}

impl CliConfig {
    /// Resolve the config file from `--config`, falling back to the data root.
    ///
    /// # Errors
    ///
    /// A `--config` value naming a directory is a usage error.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config_file = match cli.config {
            Some(ref raw) => {
                let path = normalize_user_path(raw)?;
                if path.is_dir() {
                    return Err(CliError::Arguments(format!(
                        "--config must name a file, got directory {}",
                        path.display()
                    )));
                }
                path
            }
            None => default_config_path()?,
        };
        Ok(Self {
            config_file,
            overrides: cli.overrides(),
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// State passed to every executed command.
    pub exec: ExecutionContext,
    /// The frozen command catalog.
    pub registry: Arc<CommandRegistry>,
    /// Runs registered commands.
    pub executor: CliExecutor,
}

impl CliContext {
    /// Completion engine using the configured marker.
    pub fn completion_engine(&self) -> CompletionEngine {
        CompletionEngine::new(Arc::clone(&self.registry)).with_marker(self.exec.marker())
    }

    /// Dispatcher using the configured marker.
    pub fn dispatcher(&self) -> Dispatcher<CliExecutor> {
        Dispatcher::new(Arc::clone(&self.registry), self.executor.clone())
            .with_marker(self.exec.marker())
    }
}

/// Bootstrap the CLI context.
///
/// # Errors
///
/// Fails when the config file exists but cannot be read or parsed, when the
/// layered configuration is invalid, or when the data root is unavailable.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let (mut app_config, source) = if config.config_file.exists() {
        (AppConfig::load(&config.config_file)?, ConfigSource::File)
    } else {
        debug!(path = %config.config_file.display(), "Config file not found, using defaults");
        (AppConfig::default(), ConfigSource::Defaults)
    };

    app_config.apply_overrides(&config.overrides);
    validate_config(&app_config)?;

    let log_file = resolve_in_data_root(&app_config.logging.file)?;
    let registry = Arc::new(build_registry()?);
    let executor = CliExecutor::new(Arc::clone(&registry));

    Ok(CliContext {
        exec: ExecutionContext::new(app_config, config.config_file, source, log_file),
        registry,
        executor,
    })
}
