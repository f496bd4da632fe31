//! `help` and `version` commands.

use crate::error::ShellError;
use crate::output::{Describe, DisplayValue, Record};
use crate::shell::{Command, CommandRegistry, ExecutionContext};

/// Command listing: name and description per registered command.
struct Listing<'a>(&'a CommandRegistry);

impl Describe for Listing<'_> {
    fn describe(&self) -> DisplayValue {
        DisplayValue::List(
            self.0
                .iter()
                .map(|cmd| {
                    Record::new()
                        .field("command", cmd.name())
                        .field("description", cmd.description())
                        .into()
                })
                .collect(),
        )
    }
}

/// Detail for a single command.
fn describe_command(cmd: &dyn Command) -> Record {
    let subcommands: Vec<String> = cmd
        .subcommands()
        .map(|s| s.subcommand_names().iter().map(|n| n.to_string()).collect())
        .unwrap_or_default();
    Record::new()
        .field("command", cmd.name())
        .field("description", cmd.description())
        .field("usage", cmd.usage())
        .field("subcommands", subcommands)
}

pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "List commands or show usage for one command"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        match args.first() {
            None => {
                ctx.output.format(&Listing(ctx.commands).describe())?;
                ctx.output.message("Type 'exit' or 'quit' to leave the shell.")
            }
            Some(name) => {
                let cmd = ctx
                    .commands
                    .get(name)
                    .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
                ctx.output.format(&describe_command(cmd))
            }
        }
    }
}

pub struct VersionCommand;

impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Show the shell version"
    }

    fn usage(&self) -> &str {
        "version"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &[String]) -> Result<(), ShellError> {
        ctx.output
            .message(format!("pamsh {}", env!("CARGO_PKG_VERSION")))
    }
}
