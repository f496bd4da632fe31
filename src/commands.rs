//! Built-in shell commands.
//!
//! Each command is a unit struct implementing [`Command`]; [`default_registry`]
//! wires them all up.

mod accounts;
mod connect;
mod help;
mod monitor;
mod platforms;
mod safes;
mod settings;
mod users;

pub use accounts::AccountsCommand;
pub use connect::{ConnectCommand, DisconnectCommand, StatusCommand};
pub use help::{HelpCommand, VersionCommand};
pub use monitor::MonitorCommand;
pub use platforms::PlatformsCommand;
pub use safes::SafesCommand;
pub use settings::{ConfigCommand, SetCommand};
pub use users::UsersCommand;

use crate::error::ShellError;
use crate::shell::{CommandRegistry, Subcommands};

/// Registry with every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(ConnectCommand));
    registry.register(Box::new(DisconnectCommand));
    registry.register(Box::new(StatusCommand));
    registry.register(Box::new(AccountsCommand));
    registry.register(Box::new(SafesCommand));
    registry.register(Box::new(UsersCommand));
    registry.register(Box::new(PlatformsCommand));
    registry.register(Box::new(MonitorCommand));
    registry.register(Box::new(SetCommand));
    registry.register(Box::new(ConfigCommand));
    registry.register(Box::new(HelpCommand));
    registry.register(Box::new(VersionCommand));
    registry
}

/// Fixed list of subcommand names.
pub struct SubcommandList(pub &'static [&'static str]);

impl Subcommands for SubcommandList {
    fn subcommand_names(&self) -> &[&'static str] {
        self.0
    }
}

/// Split `args` into the subcommand name and its arguments.
fn split_subcommand<'a>(
    args: &'a [String],
    usage: &str,
) -> Result<(&'a str, &'a [String]), ShellError> {
    match args.split_first() {
        Some((sub, rest)) => Ok((sub.as_str(), rest)),
        None => Err(ShellError::Usage(usage.to_string())),
    }
}

fn unknown_subcommand(command: &str, sub: &str, usage: &str) -> ShellError {
    ShellError::Usage(format!("unknown {} subcommand '{}'; {}", command, sub, usage))
}

/// Required positional argument.
fn required<'a>(positional: &'a [String], index: usize, usage: &str) -> Result<&'a str, ShellError> {
    positional
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| ShellError::Usage(usage.to_string()))
}
