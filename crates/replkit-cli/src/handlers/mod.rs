//! Command handlers shared by the REPL and the one-shot CLI.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &mut ExecutionContext, ...) -> Result<CommandOutput>`
//! - Thin wrappers that validate CLI-specific input, call into `replkit-core`,
//!   and describe their result as [`CommandOutput`] lines
//!
//! Handlers never print; rendering belongs to [`crate::presentation`].

pub mod config;
pub mod help;
pub mod process;

use anyhow::Result;

use replkit_core::{CommandOutput, CommandRegistry, ExecutionContext};

use crate::commands::Commands;

/// Route a parsed command to its handler.
pub fn execute(
    command: Commands,
    registry: &CommandRegistry,
    ctx: &mut ExecutionContext,
) -> Result<CommandOutput> {
    match command {
        Commands::Help { command } => help::execute(registry, ctx, command.as_deref()),
        Commands::Quit | Commands::Exit => {
            // Only meaningful inside the REPL, where the dispatcher intercepts them.
            let mut out = CommandOutput::new();
            out.hint("quit and exit end an interactive session; nothing to do here");
            Ok(out)
        }
        Commands::Config { command } => config::execute(ctx, command),
        Commands::Process { input, output_dir } => {
            process::execute(ctx, &input, output_dir.as_deref())
        }
    }
}
