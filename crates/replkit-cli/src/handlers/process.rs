//! Process command handler.

use anyhow::{Context, Result};

use replkit_core::paths::{normalize_user_path, resolve_in_data_root};
use replkit_core::{CommandOutput, ExecutionContext, process_data};

/// Run the sample processor on `input`.
///
/// Without `--output-dir`, output goes to `paths.output_dir` under the data root.
pub fn execute(
    ctx: &ExecutionContext,
    input: &str,
    output_dir: Option<&str>,
) -> Result<CommandOutput> {
    let input = normalize_user_path(input)?;
    let output_dir = match output_dir {
        Some(dir) => normalize_user_path(dir)?,
        None => resolve_in_data_root(&ctx.config.paths.output_dir)?,
    };

    let report = process_data(&input, &output_dir).context("Processing failed")?;

    let mut out = CommandOutput::new();
    out.success(report.message())
        .info(format!("Output: {}", report.output.display()));
    Ok(out)
}
