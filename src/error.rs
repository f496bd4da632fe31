//! Error types for the pamsh shell.

use thiserror::Error;

/// Errors raised by the vault API client.
///
/// These are surfaced verbatim to the user through [`ShellError::Api`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Shell-level errors. Every error reaching the dispatch point is one of these.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown command: {0} (type 'help' for a list of commands)")]
    UnknownCommand(String),

    #[error("Not connected. Use 'connect' to open a session.")]
    NotConnected,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("line {line}: {source}")]
    Aborted {
        line: usize,
        #[source]
        source: Box<ShellError>,
    },
}

impl ShellError {
    /// Wrap an error with the script line number that produced it.
    pub fn at_line(self, line: usize) -> Self {
        ShellError::Aborted {
            line,
            source: Box::new(self),
        }
    }
}

impl From<config::ConfigError> for ShellError {
    fn from(err: config::ConfigError) -> Self {
        ShellError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for ShellError {
    fn from(err: serde_yaml::Error) -> Self {
        ShellError::Render(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        match err {
            rustyline::error::ReadlineError::Io(e) => ShellError::Io(e),
            other => ShellError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                other.to_string(),
            )),
        }
    }
}

impl From<dialoguer::Error> for ShellError {
    fn from(err: dialoguer::Error) -> Self {
        ShellError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get user input: {}", err),
        ))
    }
}
