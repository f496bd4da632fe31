//! Command contract.

use super::context::ExecutionContext;
use crate::error::ShellError;

/// A named shell command.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    /// One-line description for the help listing.
    fn description(&self) -> &str;

    /// Usage synopsis, e.g. `accounts <list|get|password|delete> [options]`.
    fn usage(&self) -> &str;

    /// Run the command with the tokens following its name.
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError>;

    /// Optional subcommand capability, used by completion and help.
    fn subcommands(&self) -> Option<&dyn Subcommands> {
        None
    }
}

/// Static list of subcommand names a command understands.
pub trait Subcommands {
    fn subcommand_names(&self) -> &[&'static str];
}
