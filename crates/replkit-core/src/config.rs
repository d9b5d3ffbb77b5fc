//! Application configuration model.
//!
//! The configuration is layered: built-in defaults, then the YAML config file
//! (every section is `#[serde(default)]`, so a partial file only overrides the
//! keys it names), then command-line overrides. Values are addressed with
//! dotted keys (`logging.level`) by `get`/`set`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

use crate::completion::DEFAULT_MARKER;
use crate::paths::{PathError, ensure_parent_dir};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid log level '{0}' (expected one of trace, debug, info, warn, error)")]
    InvalidLogLevel(String),

    #[error("Marker must be a single non-alphanumeric, non-whitespace character, got '{0}'")]
    InvalidMarker(String),

    #[error("Application name cannot be empty")]
    EmptyAppName,

    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "replkit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSection {
    /// One of [`LOG_LEVELS`].
    pub level: String,
    /// Log file; relative paths live under the data root.
    pub file: String,
    /// Mirror log records to stderr while the REPL is running.
    pub console: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "logs/replkit.log".to_string(),
            console: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsSection {
    /// Where `process` writes its output files.
    pub output_dir: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplSection {
    /// Single character that starts a command.
    pub marker: String,
    pub prompt: String,
    pub history_file: String,
    pub show_welcome: bool,
}

impl Default for ReplSection {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            prompt: "> ".to_string(),
            history_file: ".repl_history".to_string(),
            show_welcome: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentSection {
    /// Route free text (no marker) to the agent passthrough instead of a hint.
    pub enabled: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub logging: LoggingSection,
    pub paths: PathsSection,
    pub repl: ReplSection,
    pub agent: AgentSection,
}

/// Command-line overrides applied on top of the file layer.
///
/// `None` leaves the loaded value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load a config file, filling missing keys from defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file is a valid "all defaults" document.
        let config: Self = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        validate_config(&config)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Write the configuration as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        ensure_parent_dir(path)?;
        let contents = self.to_yaml_string()?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply command-line overrides, only touching fields that are `Some`.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref level) = overrides.log_level {
            self.logging.level.clone_from(level);
        }
    }

    /// The command marker as a character.
    pub fn marker(&self) -> char {
        let mut chars = self.repl.marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => DEFAULT_MARKER,
        }
    }

    /// Look up a value by dotted key; strings are returned unquoted.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_yaml::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&root, |node, segment| node.get(segment))?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Set a value by dotted key.
    ///
    /// The raw value is parsed according to the type of the existing entry.
    /// Unknown keys are rejected, and the result must pass validation.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let mut root = serde_yaml::to_value(&*self)?;

        let mut node = &mut root;
        for segment in key.split('.') {
            node = node
                .get_mut(segment)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        *node = match node {
            Value::String(_) => Value::String(raw.to_string()),
            Value::Bool(_) => Value::Bool(parse_bool(raw).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected true or false, got '{raw}'"),
                }
            })?),
            Value::Number(_) => {
                let n: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected an integer, got '{raw}'"),
                })?;
                Value::Number(n.into())
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };

        let updated: Self = serde_yaml::from_value(root).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        validate_config(&updated)?;
        *self = updated;
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Validate configuration values.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.app.name.trim().is_empty() {
        return Err(ConfigError::EmptyAppName);
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    let mut chars = config.repl.marker.chars();
    let marker_ok = match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric() && !c.is_whitespace(),
        _ => false,
    };
    if !marker_ok {
        return Err(ConfigError::InvalidMarker(config.repl.marker.clone()));
    }

    Ok(())
}
