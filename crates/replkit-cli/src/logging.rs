//! Tracing initialization.
//!
//! Logs always go to a plain-text file; stderr output is optional so the
//! REPL prompt is not interleaved with log lines.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use replkit_core::paths::ensure_parent_dir;

use crate::error::CliError;

/// Initialize tracing with a file appender.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard must be held
/// until exit so buffered lines are flushed.
pub fn init_tracing(log_file: &Path, level: &str, console: bool) -> Result<WorkerGuard, CliError> {
    ensure_parent_dir(log_file)?;
    let (dir, file_name) = split_log_path(log_file)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact(),
        )
        .with(console_layer)
        .try_init();

    Ok(guard)
}

/// Split a log path into the directory and file name the appender expects.
fn split_log_path(log_file: &Path) -> Result<(PathBuf, OsString), CliError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| CliError::Config(format!("Invalid log file: {}", log_file.display())))?
        .to_os_string();
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
