//! `users` command.

use super::{required, split_subcommand, unknown_subcommand, SubcommandList};
use crate::error::ShellError;
use crate::shell::{extract, Command, ExecutionContext, Subcommands};

const USAGE: &str = "users list [--search=<text>] | users get <id>";

static SUBCOMMANDS: SubcommandList = SubcommandList(&["list", "get"]);

pub struct UsersCommand;

impl Command for UsersCommand {
    fn name(&self) -> &str {
        "users"
    }

    fn description(&self) -> &str {
        "List or inspect vault users"
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
                let users = ctx.run(client.list_users(session.token(), ex.flag("search")))??;
                ctx.output.format(&users)
            }
            "get" => {
                let raw = required(&ex.positional, 0, "users get <id>")?;
                let id: i64 = raw
                    .parse()
                    .map_err(|_| ShellError::Parse(format!("user id must be numeric, got '{}'", raw)))?;
                let session = ctx.require_session()?;
                let client = session.client();
                let user = ctx.run(client.get_user(session.token(), id))??;
                ctx.output.format(&user)
            }
            other => Err(unknown_subcommand("users", other, USAGE)),
        }
    }
}
