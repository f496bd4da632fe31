//! Line sources: script files, piped stdin and the interactive editor.

use super::completion::ShellCompletion;
use crate::error::ShellError;
use rustyline::config::EditMode;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Executable lines of a script with their 1-based line numbers.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn script_lines(text: &str) -> Vec<(usize, String)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some((i + 1, trimmed.to_string()))
            }
        })
        .collect()
}

pub fn read_script(path: &Path) -> Result<Vec<(usize, String)>, ShellError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ShellError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read script {}: {}", path.display(), e),
        ))
    })?;
    Ok(script_lines(&text))
}

/// Read all of standard input as a script.
pub fn read_piped() -> Result<Vec<(usize, String)>, ShellError> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(script_lines(&text))
}

/// Outcome of one interactive read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    Line(String),
    Interrupted,
    Eof,
}

/// Source of interactive lines.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError>;

    /// Persist whatever history the reader keeps. Default is a no-op.
    fn save_history(&mut self) -> Result<(), ShellError> {
        Ok(())
    }
}

/// `rustyline` editor with completion and a history file.
pub struct RustylineReader {
    editor: Editor<ShellCompletion, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl RustylineReader {
    pub fn new(
        completion: ShellCompletion,
        history_size: usize,
        history_path: Option<PathBuf>,
    ) -> Result<Self, ShellError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(history_size)?
            .auto_add_history(true)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(completion));

        if let Some(path) = &history_path {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    warn!(path = %path.display(), error = %e, "Failed to load history");
                }
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn save_history(&mut self) -> Result<(), ShellError> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.editor.save_history(path)?;
        debug!(path = %path.display(), "Saved history");
        Ok(())
    }
}
