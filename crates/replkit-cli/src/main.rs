//! CLI entry point - the composition root.
//!
//! Without a subcommand (or with `--repl`) the interactive REPL starts;
//! otherwise the command runs once through the same handlers and the
//! process exits with a code derived from [`CliError`].

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use replkit_cli::{Cli, CliConfig, CliContext, CliError, Commands, bootstrap, logging, presentation, repl};

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments; clap exits with code 2 on usage errors
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", presentation::format_error(&err.to_string()));
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli)?;
    let mut ctx = bootstrap(config)?;

    let interactive = cli.is_interactive();
    let console = !interactive || ctx.exec.config.logging.console;
    let _guard = logging::init_tracing(
        &ctx.exec.log_file,
        &ctx.exec.config.logging.level,
        console,
    )?;
    info!(
        config = %ctx.exec.config_file.display(),
        source = ?ctx.exec.config_source,
        "Starting replkit"
    );

    if let Some(command) = cli.command {
        run_once(&mut ctx, command)?;
    }

    if interactive {
        repl::run(&mut ctx)?;
    }
    Ok(())
}

fn run_once(ctx: &mut CliContext, command: Commands) -> Result<(), CliError> {
    match ctx.executor.run(command, &mut ctx.exec) {
        Ok(output) => {
            presentation::render_output(&output);
            Ok(())
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "Command failed");
            Err(CliError::Command(message))
        }
    }
}
