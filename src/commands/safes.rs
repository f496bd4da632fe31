//! `safes` command.

use super::{required, split_subcommand, unknown_subcommand, SubcommandList};
use crate::error::ShellError;
use crate::shell::{extract, Command, ExecutionContext, Subcommands};

const USAGE: &str = "safes list [--search=<text>] | safes get <name>";

static SUBCOMMANDS: SubcommandList = SubcommandList(&["list", "get"]);

pub struct SafesCommand;

impl Command for SafesCommand {
    fn name(&self) -> &str {
        "safes"
    }

    fn description(&self) -> &str {
        "List or inspect safes"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    fn subcommands(&self) -> Option<&dyn Subcommands> {
        Some(&SUBCOMMANDS)
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        let (sub, rest) = split_subcommand(args, USAGE)?;
        let ex = extract(rest);
        match sub {
            "list" => {
                let session = ctx.require_session()?;
                let client = session.client();
                let safes = ctx.run(client.list_safes(session.token(), ex.flag("search")))??;
                ctx.output.format(&safes)
            }
            "get" => {
                let name = required(&ex.positional, 0, "safes get <name>")?;
                let session = ctx.require_session()?;
                let client = session.client();
                let safe = ctx.run(client.get_safe(session.token(), name))??;
                ctx.output.format(&safe)
            }
            other => Err(unknown_subcommand("safes", other, USAGE)),
        }
    }
}
