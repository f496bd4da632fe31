//! CLI parse: clap types for pamsh. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// pamsh - interactive shell for privileged access management
#[derive(Parser, Debug)]
#[command(name = "pamsh", version)]
#[command(about = "Interactive shell for administering a privileged access management vault")]
pub struct Cli {
    /// Execute a single command and exit
    #[arg(short = 'c', long = "command", value_name = "LINE", conflicts_with = "script")]
    pub command: Option<String>,

    /// Execute commands from a script file, stopping at the first failure
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Vault server URL
    #[arg(long, env = "PAMSH_SERVER")]
    pub server: Option<String>,

    /// Default user name for connect
    #[arg(long, env = "PAMSH_USERNAME")]
    pub username: Option<String>,

    /// Authentication method (cyberark, ldap, radius, windows)
    #[arg(long, env = "PAMSH_AUTH_METHOD")]
    pub auth_method: Option<String>,

    /// Disable colored error output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, short = 'v', default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
