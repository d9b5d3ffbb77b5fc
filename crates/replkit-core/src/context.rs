//! Execution context passed into every dispatched command.
//!
//! Constructed once at startup by the composition root. Commands run one at a
//! time, so a command may replace the configuration (`config load`,
//! `config set`) without any synchronization.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from `config_file`.
    File,
    /// `config_file` did not exist; built-in defaults are in use.
    Defaults,
}

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub config: AppConfig,
    /// Config file the session was started with, or last loaded via `config load`.
    pub config_file: PathBuf,
    pub config_source: ConfigSource,
    /// Log file the tracing subscriber writes to.
    pub log_file: PathBuf,
}

impl ExecutionContext {
    pub const fn new(
        config: AppConfig,
        config_file: PathBuf,
        config_source: ConfigSource,
        log_file: PathBuf,
    ) -> Self {
        Self {
            config,
            config_file,
            config_source,
            log_file,
        }
    }

    /// Replace the active configuration after a successful `config load`.
    pub fn replace_config(&mut self, config: AppConfig, source_file: &Path) {
        self.config = config;
        self.config_file = source_file.to_path_buf();
        self.config_source = ConfigSource::File;
    }

    pub fn marker(&self) -> char {
        self.config.marker()
    }
}
