//! rustyline-backed [`LineSource`].

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use tracing::debug;

use replkit_core::paths::ensure_parent_dir;
use replkit_core::{CompletionEngine, LineEvent, LineSource};

use super::helper::ReplHelper;

/// Terminal line editor with persistent history.
pub struct RustylineSource {
    editor: Editor<ReplHelper, DefaultHistory>,
    history_file: PathBuf,
}

impl RustylineSource {
    /// Create the editor and load history from `history_file` if it exists.
    pub fn new(history_file: PathBuf) -> rustyline::Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .history_ignore_dups(true)?
            .build();
        let mut editor = Editor::with_config(config)?;

        if let Err(err) = editor.load_history(&history_file) {
            debug!(path = %history_file.display(), error = %err, "No history loaded");
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

fn into_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::other(other),
    }
}

impl LineSource for RustylineSource {
    fn on_partial_input(&mut self, engine: CompletionEngine) {
        self.editor.set_helper(Some(ReplHelper::new(engine)));
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<LineEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(LineEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(LineEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(LineEvent::EndOfInput),
            Err(err) => Err(into_io(err)),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        ensure_parent_dir(&self.history_file).map_err(io::Error::other)?;
        self.editor.save_history(&self.history_file).map_err(into_io)
    }
}
