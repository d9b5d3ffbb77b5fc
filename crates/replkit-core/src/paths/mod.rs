//! Path resolution for replkit data files.
//!
//! Every file the application owns (default config, log, REPL history, sample
//! output) lives under a single data root:
//!
//! 1. `REPLKIT_DATA_DIR` environment variable (highest priority)
//! 2. System data directory (e.g. `~/.local/share/replkit`)
//!
//! Relative paths found in the config file are resolved against that root;
//! paths typed by the user on the command line are resolved against the
//! current directory.

mod error;
mod platform;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::PathError;
pub use platform::{
    DATA_DIR_ENV, data_root, default_config_path, ensure_parent_dir, normalize_user_path,
    resolve_in_data_root,
};
