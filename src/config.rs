//! Configuration System
//!
//! Persisted shell settings: server, authentication method, output format, history
//! size, TLS verification, request timeout and an optional credential-provider
//! block. Loaded through the `config` crate with defaults, normalized after load
//! (invalid enumerated values fall back to their default instead of failing).

use crate::client::AuthMethod;
use crate::error::ShellError;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

const APP_NAME: &str = "pamsh";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Vault base URL (e.g. https://vault.example.com)
    #[serde(default)]
    pub server: String,

    /// Default user name for `connect`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Authentication method: cyberark, ldap, radius, windows
    #[serde(default = "default_auth_method")]
    pub auth_method: String,

    /// Output format: table, json, yaml
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Number of entries kept in the interactive history
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Verify the server TLS certificate
    #[serde(default = "default_true")]
    pub verify_tls: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Credential provider used by `connect --ccp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccp: Option<CcpConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Central credential provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcpConfig {
    /// Provider base URL
    pub url: String,
    /// Application ID registered with the provider
    pub app_id: String,
    /// Safe holding the logon credential
    pub safe: String,
    /// Object (account) name inside the safe
    pub object: String,
}

fn default_auth_method() -> String {
    AuthMethod::default().as_str().to_string()
}

fn default_output_format() -> String {
    OutputFormat::default().as_str().to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            username: None,
            auth_method: default_auth_method(),
            output_format: default_output_format(),
            history_size: default_history_size(),
            verify_tls: default_true(),
            timeout_secs: default_timeout_secs(),
            ccp: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Replace invalid or out-of-range values with their defaults.
    pub fn normalize(&mut self) {
        match self.auth_method.parse::<AuthMethod>() {
            Ok(method) => self.auth_method = method.as_str().to_string(),
            Err(_) => {
                debug!(value = %self.auth_method, "Unknown auth method, using default");
                self.auth_method = default_auth_method();
            }
        }
        match self.output_format.parse::<OutputFormat>() {
            Ok(format) => self.output_format = format.as_str().to_string(),
            Err(_) => {
                debug!(value = %self.output_format, "Unknown output format, using default");
                self.output_format = default_output_format();
            }
        }
        if self.history_size == 0 {
            self.history_size = default_history_size();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        self.server = self.server.trim().trim_end_matches('/').to_string();
        if self.username.as_deref().map(str::trim) == Some("") {
            self.username = None;
        }
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method.parse().unwrap_or_default()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.parse().unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply a single named setting, as used by the `set` command.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match key {
            "server" => self.server = value.trim().trim_end_matches('/').to_string(),
            "username" | "user" => {
                self.username = Some(value.to_string()).filter(|v| !v.is_empty())
            }
            "auth" | "auth_method" | "auth-method" => {
                let method: AuthMethod = value.parse()?;
                self.auth_method = method.as_str().to_string();
            }
            "output" | "output_format" => {
                let format: OutputFormat = value.parse()?;
                self.output_format = format.as_str().to_string();
            }
            "history_size" | "history-size" => {
                self.history_size = parse_positive(key, value)? as usize;
            }
            "timeout" | "timeout_secs" => self.timeout_secs = parse_positive(key, value)?,
            "verify_tls" | "verify-tls" => self.verify_tls = parse_switch(key, value)?,
            other => {
                return Err(ShellError::Usage(format!(
                    "unknown setting '{}' (server, username, auth, output, history-size, timeout, verify-tls)",
                    other
                )))
            }
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ShellError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ShellError::Parse(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool, ShellError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ShellError::Parse(format!(
            "{} expects on/off, got '{}'",
            key, value
        ))),
    }
}

/// User configuration directory (`$XDG_CONFIG_HOME/pamsh` on Linux).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// User data directory, holds history and log files.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Interactive history file location.
pub fn history_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("history.txt"))
}
