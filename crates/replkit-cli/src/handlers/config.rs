//! Config command handler.
//!
//! Shows, loads, saves and edits the active configuration. Edits only touch
//! the in-memory copy until `config save` writes it out.

use anyhow::{Context, Result, anyhow};
use tracing::info;

use replkit_core::paths::normalize_user_path;
use replkit_core::{AppConfig, CommandOutput, ConfigSource, ExecutionContext, LineKind};

use crate::config_commands::ConfigCommand;

/// Execute the config command.
pub fn execute(ctx: &mut ExecutionContext, command: ConfigCommand) -> Result<CommandOutput> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Load { file } => load(ctx, &file),
        ConfigCommand::Save { file } => save(ctx, file.as_deref()),
        ConfigCommand::Get { key } => get(ctx, &key),
        ConfigCommand::Set { key, value } => set(ctx, &key, &value),
    }
}

fn show(ctx: &ExecutionContext) -> Result<CommandOutput> {
    let source = match ctx.config_source {
        ConfigSource::File => format!("Source: {}", ctx.config_file.display()),
        ConfigSource::Defaults => format!(
            "Source: built-in defaults ({} not found)",
            ctx.config_file.display()
        ),
    };

    let mut out = CommandOutput::new();
    out.heading("Current configuration").info(source);
    out.block(LineKind::Plain, ctx.config.to_yaml_string()?.trim_end());
    Ok(out)
}

fn load(ctx: &mut ExecutionContext, file: &str) -> Result<CommandOutput> {
    let path = normalize_user_path(file)?;
    let config = AppConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let logging_changed = config.logging != ctx.config.logging;
    let marker_changed = config.repl.marker != ctx.config.repl.marker;
    ctx.replace_config(config, &path);
    info!(path = %path.display(), "Configuration loaded");

    let mut out = CommandOutput::new();
    out.success(format!("Configuration loaded from: {}", path.display()));
    if logging_changed {
        out.hint("Logging settings take effect on next start");
    }
    if marker_changed {
        out.hint("The new command marker takes effect on next start");
    }
    Ok(out)
}

fn save(ctx: &ExecutionContext, file: Option<&str>) -> Result<CommandOutput> {
    let path = match file {
        Some(file) => normalize_user_path(file)?,
        None => ctx.config_file.clone(),
    };
    ctx.config
        .save(&path)
        .with_context(|| format!("Failed to save configuration to {}", path.display()))?;
    info!(path = %path.display(), "Configuration saved");

    let mut out = CommandOutput::new();
    out.success(format!("Configuration saved to: {}", path.display()));
    Ok(out)
}

fn get(ctx: &ExecutionContext, key: &str) -> Result<CommandOutput> {
    let value = ctx
        .config
        .get(key)
        .ok_or_else(|| anyhow!("Unknown configuration key: {key}"))?;
    let mut out = CommandOutput::new();
    out.plain(format!("{key} = {value}"));
    Ok(out)
}

fn set(ctx: &mut ExecutionContext, key: &str, value: &str) -> Result<CommandOutput> {
    ctx.config.set(key, value)?;
    info!(key, value, "Configuration value updated");

    let mut out = CommandOutput::new();
    out.success(format!("Set {key} = {value}"));
    if key.starts_with("logging.") {
        out.hint("Logging settings take effect on next start");
    } else if key == "repl.marker" {
        out.hint("The new command marker takes effect on next start");
    }
    out.hint("Run config save to persist changes");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    fn ctx(config_file: PathBuf) -> ExecutionContext {
        ExecutionContext::new(
            AppConfig::default(),
            config_file,
            ConfigSource::Defaults,
            PathBuf::from("replkit.log"),
        )
    }

    #[test]
    fn show_mentions_defaults_and_sections() {
        let ctx = ctx(PathBuf::from("/nowhere/config.yaml"));
        let text = execute(&mut ctx.clone(), ConfigCommand::Show).unwrap().text();
        assert!(text.contains("built-in defaults"));
        assert!(text.contains("logging:"));
        assert!(text.contains("repl:"));
    }

    #[test]
    fn set_then_save_then_load() {
        let temp = tempdir().unwrap();
        let saved = temp.path().join("saved.yaml");
        let mut ctx = ctx(temp.path().join("config.yaml"));

        let out = execute(
            &mut ctx,
            ConfigCommand::Set {
                key: "logging.level".into(),
                value: "debug".into(),
            },
        )
        .unwrap();
        assert!(out.text().contains("next start"));

        execute(
            &mut ctx,
            ConfigCommand::Save {
                file: Some(saved.display().to_string()),
            },
        )
        .unwrap();
        assert!(fs::read_to_string(&saved).unwrap().contains("debug"));

        let mut fresh = self::ctx(temp.path().join("config.yaml"));
        execute(
            &mut fresh,
            ConfigCommand::Load {
                file: saved.display().to_string(),
            },
        )
        .unwrap();
        assert_eq!(fresh.config.logging.level, "debug");
        assert_eq!(fresh.config_source, ConfigSource::File);
        assert_eq!(fresh.config_file, saved);
    }

    #[test]
    fn save_defaults_to_active_config_file() {
        let temp = tempdir().unwrap();
        let active = temp.path().join("nested").join("config.yaml");
        let mut ctx = ctx(active.clone());
        execute(&mut ctx, ConfigCommand::Save { file: None }).unwrap();
        assert!(active.is_file());
    }

    #[test]
    fn get_reports_value_or_unknown_key() {
        let mut ctx = ctx(PathBuf::from("config.yaml"));
        let out = execute(
            &mut ctx,
            ConfigCommand::Get {
                key: "repl.marker".into(),
            },
        )
        .unwrap();
        assert_eq!(out.text(), "repl.marker = /");

        let err = execute(
            &mut ctx,
            ConfigCommand::Get {
                key: "repl.nope".into(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("repl.nope"));
    }

    #[test]
    fn invalid_set_leaves_config_unchanged() {
        let mut ctx = ctx(PathBuf::from("config.yaml"));
        let before = ctx.config.clone();
        assert!(
            execute(
                &mut ctx,
                ConfigCommand::Set {
                    key: "logging.level".into(),
                    value: "loud".into(),
                },
            )
            .is_err()
        );
        assert_eq!(ctx.config, before);
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = tempdir().unwrap();
        let mut ctx = ctx(temp.path().join("config.yaml"));
        let err = execute(
            &mut ctx,
            ConfigCommand::Load {
                file: temp.path().join("missing.yaml").display().to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
        assert_eq!(ctx.config_source, ConfigSource::Defaults);
    }
}
