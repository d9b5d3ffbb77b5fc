//! REPL and one-shot CLI adapter for replkit.
//!
//! Wires the core registry, completion engine and dispatcher to clap,
//! rustyline and the terminal. `main.rs` is a thin entry point over
//! [`bootstrap`], [`repl::run`] and [`CliExecutor::run`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;

pub mod bootstrap;
pub mod catalog;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;
pub mod repl;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ReplLine};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use executor::CliExecutor;
pub use parser::Cli;
