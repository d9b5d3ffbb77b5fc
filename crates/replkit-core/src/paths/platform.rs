//! Data-root detection and path normalization.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "REPLKIT_DATA_DIR";

const APP_DIR_NAME: &str = "replkit";

/// Root directory for config, logs and history.
///
/// Resolution order:
/// 1. `REPLKIT_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/replkit`), created on demand
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    let root = dirs::data_local_dir()
        .ok_or(PathError::NoDataDir)?
        .join(APP_DIR_NAME);

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Config file used when `--config` is not given.
pub fn default_config_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("config.yaml"))
}

/// Resolve a path from the config file: `~` is expanded, absolute paths are
/// kept, relative paths are placed under the data root.
pub fn resolve_in_data_root(raw: &str) -> Result<PathBuf, PathError> {
    let expanded = expand_home(raw)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(data_root()?.join(expanded))
    }
}

/// Normalize a user-provided path, expanding `~` and making it absolute
/// relative to the current directory.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let expanded = expand_home(raw)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PathError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn expand_home(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    if trimmed == "~" {
        return dirs::home_dir().ok_or(PathError::NoHomeDir);
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn data_root_honors_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, temp.path().to_string_lossy().as_ref());

        assert_eq!(data_root().unwrap(), temp.path());
        assert_eq!(default_config_path().unwrap(), temp.path().join("config.yaml"));
    }

    #[test]
    fn relative_config_paths_land_under_data_root() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, temp.path().to_string_lossy().as_ref());

        assert_eq!(
            resolve_in_data_root("logs/replkit.log").unwrap(),
            temp.path().join("logs/replkit.log")
        );
        let absolute = temp.path().join("elsewhere.log");
        assert_eq!(
            resolve_in_data_root(absolute.to_str().unwrap()).unwrap(),
            absolute
        );
    }

    #[test]
    fn empty_paths_are_rejected() {
        assert!(matches!(normalize_user_path("  "), Err(PathError::EmptyPath)));
        assert!(matches!(resolve_in_data_root(""), Err(PathError::EmptyPath)));
    }

    #[test]
    fn user_paths_become_absolute() {
        let path = normalize_user_path("some/file.yaml").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("some/file.yaml"));
    }

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("a/b/c.log");
        ensure_parent_dir(&target).unwrap();
        assert!(temp.path().join("a/b").is_dir());
        // Bare file names have no parent to create.
        ensure_parent_dir(Path::new("c.log")).unwrap();
    }
}
