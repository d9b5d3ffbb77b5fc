//! Interactive REPL mode.

pub mod helper;
pub mod line_source;

pub use helper::ReplHelper;
pub use line_source::RustylineSource;

use replkit_core::paths::resolve_in_data_root;
use replkit_core::{LoopEvent, Session, TerminationReason};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation;

/// Run the REPL until quit, a second Ctrl-C, or end of input.
pub fn run(ctx: &mut CliContext) -> Result<TerminationReason, CliError> {
    let history_file = resolve_in_data_root(&ctx.exec.config.repl.history_file)?;
    let mut source =
        RustylineSource::new(history_file).map_err(|err| CliError::Io(err.to_string()))?;

    let mut session = Session::new(ctx.completion_engine(), ctx.dispatcher());
    let prompt = ctx.exec.config.repl.prompt.clone();

    if ctx.exec.config.repl.show_welcome {
        presentation::show_welcome(&ctx.exec);
    }
    info!(marker = %ctx.exec.marker(), "Starting interactive session");

    let reason = session.run(&mut source, &mut ctx.exec, &prompt, |event, exec| match event {
        LoopEvent::Outcome(outcome) => presentation::render_outcome(outcome, exec),
        LoopEvent::LineCancelled => presentation::render_cancelled(),
    })?;

    presentation::show_goodbye(reason);
    Ok(reason)
}
