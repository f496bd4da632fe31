//! CLI route: resolve configuration and run mode, then drive the shell.

use crate::cli::parse::Cli;
use crate::client::http::HttpConnector;
use crate::commands::default_registry;
use crate::config::{self, ConfigLoader, ShellConfig};
use crate::error::ShellError;
use crate::shell::{read_piped, read_script, RustylineReader, Shell, ShellCompletion};
use std::path::PathBuf;
use tracing::{debug, info};

/// How the shell receives its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// `-c "<line>"`
    Single(String),
    /// `--script=<path>`
    Script(PathBuf),
    /// Non-terminal standard input
    Piped,
    /// Line editor
    Interactive,
}

impl RunMode {
    /// `-c` wins, then `--script`, then piped stdin; otherwise interactive.
    pub fn select(cli: &Cli, stdin_is_terminal: bool) -> Self {
        if let Some(line) = &cli.command {
            RunMode::Single(line.clone())
        } else if let Some(path) = &cli.script {
            RunMode::Script(path.clone())
        } else if !stdin_is_terminal {
            RunMode::Piped
        } else {
            RunMode::Interactive
        }
    }
}

/// Load configuration and apply command-line overrides.
///
/// Precedence: CLI flags and `PAMSH_*` environment over the config file over defaults.
pub fn load_config(cli: &Cli) -> Result<ShellConfig, ShellError> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(server) = &cli.server {
        config.set("server", server)?;
    }
    if let Some(username) = &cli.username {
        config.set("username", username)?;
    }
    if let Some(method) = &cli.auth_method {
        config.set("auth", method)?;
    }
    if let Some(output) = &cli.output {
        config.set("output", output)?;
    }
    debug!(server = %config.server, output = %config.output_format, "Configuration resolved");
    Ok(config)
}

/// Build the shell over the HTTP client and run it in the selected mode.
pub fn run(cli: &Cli, config: ShellConfig, mode: RunMode) -> Result<(), ShellError> {
    let registry = default_registry();
    let completion = ShellCompletion::from_registry(&registry);
    let history_size = config.history_size;
    let mut shell = Shell::new(registry, config, Box::new(HttpConnector))?
        .with_color(!cli.no_color && mode == RunMode::Interactive);

    info!(mode = ?mode, "Starting shell");
    let result = match mode {
        RunMode::Single(line) => shell.run_single(&line),
        RunMode::Script(path) => read_script(&path).and_then(|lines| shell.run_lines(&lines)),
        RunMode::Piped => read_piped().and_then(|lines| shell.run_lines(&lines)),
        RunMode::Interactive => {
            let mut reader =
                RustylineReader::new(completion, history_size, config::history_file())?;
            shell.run_interactive(&mut reader)
        }
    };
    shell.shutdown();
    result
}
