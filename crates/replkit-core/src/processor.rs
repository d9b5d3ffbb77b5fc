//! Sample business logic hosted by the template.
//!
//! Framework-agnostic: called by the `process` command from both the REPL and
//! the one-shot CLI, and directly by tests. Replace with real processing.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::paths::{PathError, ensure_parent_dir};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Summary of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub rows: usize,
    pub output: PathBuf,
}

impl ProcessReport {
    pub fn message(&self) -> String {
        format!("Successfully processed {} rows", self.rows)
    }
}

/// Output file for `input`: `<output_dir>/<stem>_processed<.ext>`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_processed.{}", ext.to_string_lossy()),
        None => format!("{stem}_processed"),
    };
    output_dir.join(file_name)
}

/// Upper-case every line of `input` into a file under `output_dir`.
pub fn process_data(input: &Path, output_dir: &Path) -> Result<ProcessReport, ProcessError> {
    info!(input = %input.display(), "Processing file");

    if !input.is_file() {
        return Err(ProcessError::InputNotFound(input.to_path_buf()));
    }

    let contents = fs::read_to_string(input).map_err(|source| ProcessError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut processed = String::with_capacity(contents.len());
    let mut rows = 0;
    for line in contents.split_inclusive('\n') {
        processed.push_str(&line.to_uppercase());
        rows += 1;
    }

    let output = output_path_for(input, output_dir);
    ensure_parent_dir(&output)?;
    fs::write(&output, processed).map_err(|source| ProcessError::Write {
        path: output.clone(),
        source,
    })?;

    info!(rows, output = %output.display(), "Processing complete");
    Ok(ProcessReport { rows, output })
}
