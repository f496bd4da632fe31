//! Shell execution engine: tokenizing, dispatch and the line loops.
//!
//! Every run mode (interactive, script, piped, single command) funnels each
//! line through [`Shell::execute_line`].

pub mod command;
pub mod completion;
pub mod context;
pub mod flags;
pub mod registry;
pub mod source;
pub mod tokenize;

pub use command::{Command, Subcommands};
pub use completion::ShellCompletion;
pub use context::{ExecutionContext, ExecutionScope};
pub use flags::{extract, Extracted};
pub use registry::CommandRegistry;
pub use source::{read_piped, read_script, script_lines, LineReader, ReadEvent, RustylineReader};
pub use tokenize::tokenize;

use crate::cli::map_error;
use crate::client::{Connector, Session};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::output::OutputFormatter;
use owo_colors::OwoColorize;
use std::io::Write;
use tracing::{debug, info, warn};

const INTERRUPT_HINT: &str = "(Use 'exit' or Ctrl-D to quit)";

/// Whether the loop should keep reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// The shell: owns the registry, session, configuration and formatter.
pub struct Shell {
    registry: CommandRegistry,
    scope: ExecutionScope,
    session: Option<Session>,
    config: ShellConfig,
    output: OutputFormatter,
    connector: Box<dyn Connector>,
    errors: Box<dyn Write + Send>,
    color: bool,
}

impl Shell {
    /// Shell writing results to stdout and errors to stderr.
    pub fn new(
        registry: CommandRegistry,
        config: ShellConfig,
        connector: Box<dyn Connector>,
    ) -> Result<Self, ShellError> {
        let output = OutputFormatter::new(config.output_format());
        Ok(Self {
            registry,
            scope: ExecutionScope::new()?,
            session: None,
            config,
            output,
            connector,
            errors: Box::new(std::io::stderr()),
            color: false,
        })
    }

    pub fn with_output(mut self, output: OutputFormatter) -> Self {
        self.output = output;
        self
    }

    pub fn with_error_sink(mut self, errors: Box<dyn Write + Send>) -> Self {
        self.errors = errors;
        self
    }

    /// Colorize interactive error reports.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn output(&self) -> &OutputFormatter {
        &self.output
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Interactive prompt, showing the user and server when connected.
    pub fn prompt(&self) -> String {
        match &self.session {
            Some(s) if s.is_valid() => format!("pamsh({}@{})> ", s.username(), s.server()),
            _ => "pamsh> ".to_string(),
        }
    }

    /// Execute one line of input.
    pub fn execute_line(&mut self, line: &str) -> Result<LineOutcome, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Continue);
        }
        if line == "exit" || line == "quit" {
            return Ok(LineOutcome::Exit);
        }

        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(LineOutcome::Continue);
        };
        if name == "exit" || name == "quit" {
            return Ok(LineOutcome::Exit);
        }

        let command = self
            .registry
            .get(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;

        debug!(command = %name, args = ?args, "Dispatching command");
        let mut ctx = ExecutionContext {
            scope: &self.scope,
            session: &mut self.session,
            config: &mut self.config,
            output: &mut self.output,
            connector: self.connector.as_ref(),
            commands: &self.registry,
        };
        command.execute(&mut ctx, args)?;
        Ok(LineOutcome::Continue)
    }

    /// Execute a single `-c` command line.
    pub fn run_single(&mut self, line: &str) -> Result<(), ShellError> {
        self.execute_line(line).map(|_| ())
    }

    /// Execute numbered lines top to bottom, stopping at the first failure.
    pub fn run_lines(&mut self, lines: &[(usize, String)]) -> Result<(), ShellError> {
        for (number, line) in lines {
            match self.execute_line(line) {
                Ok(LineOutcome::Continue) => {}
                Ok(LineOutcome::Exit) => break,
                Err(e) => {
                    warn!(line = number, error = %e, "Script aborted");
                    return Err(e.at_line(*number));
                }
            }
        }
        Ok(())
    }

    /// Read-eval loop. Errors are reported and the loop continues; EOF or `exit` ends it.
    pub fn run_interactive(&mut self, reader: &mut dyn LineReader) -> Result<(), ShellError> {
        info!("Interactive session started");
        loop {
            let prompt = self.prompt();
            match reader.read_line(&prompt)? {
                ReadEvent::Line(line) => match self.execute_line(&line) {
                    Ok(LineOutcome::Continue) => {}
                    Ok(LineOutcome::Exit) => break,
                    Err(e) => self.report_error(&e),
                },
                ReadEvent::Interrupted => {
                    let _ = writeln!(self.errors, "{}", INTERRUPT_HINT);
                }
                ReadEvent::Eof => break,
            }
        }
        if let Err(e) = reader.save_history() {
            warn!(error = %e, "Failed to save history");
        }
        Ok(())
    }

    /// Print an error as a single line on the error sink.
    pub fn report_error(&mut self, err: &ShellError) {
        warn!(error = %err, "Command failed");
        let message = format!("Error: {}", map_error(err));
        let _ = if self.color {
            writeln!(self.errors, "{}", message.red())
        } else {
            writeln!(self.errors, "{}", message)
        };
        let _ = self.errors.flush();
    }

    /// Log off a live session, then cancel the scope. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            if session.is_valid() {
                let client = session.client();
                match self.scope.run(client.logoff(session.token())) {
                    Ok(Ok(())) => info!(server = %session.server(), "Logged off"),
                    Ok(Err(e)) => warn!(error = %e, "Logoff failed"),
                    Err(e) => warn!(error = %e, "Logoff skipped"),
                }
            }
        }
        self.scope.cancel();
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.shutdown();
    }
}
