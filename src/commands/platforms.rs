//! `platforms` command.

use super::{split_subcommand, unknown_subcommand, SubcommandList};
use crate::error::ShellError;
use crate::shell::{extract, Command, ExecutionContext, Subcommands};

const USAGE: &str = "platforms list [--active]";

static SUBCOMMANDS: SubcommandList = SubcommandList(&["list"]);

pub struct PlatformsCommand;

impl Command for PlatformsCommand {
    fn name(&self) -> &str {
        "platforms"
    }

    fn description(&self) -> &str {
        "List account platforms"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    fn subcommands(&self) -> Option<&dyn Subcommands> {
        Some(&SUBCOMMANDS)
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        let (sub, rest) = split_subcommand(args, USAGE)?;
        match sub {
            "list" => {
                let active_only = extract(rest).bool_flag("active");
                let session = ctx.require_session()?;
                let client = session.client();
                let platforms = ctx.run(client.list_platforms(session.token(), active_only))??;
                ctx.output.format(&platforms)
            }
            other => Err(unknown_subcommand("platforms", other, USAGE)),
        }
    }
}
