//! `accounts` command.

use super::{required, split_subcommand, unknown_subcommand, SubcommandList};
use crate::client::AccountQuery;
use crate::error::ShellError;
use crate::output::Record;
use crate::shell::{extract, Command, ExecutionContext, Subcommands};
use tracing::info;

const USAGE: &str = "accounts list [--search=<text>] [--safe=<name>] [--limit=<n>] [--offset=<n>] \
                     | accounts get <id> | accounts password <id> [--reason=<text>] \
                     | accounts delete <id> [--force]";

static SUBCOMMANDS: SubcommandList = SubcommandList(&["list", "get", "password", "delete"]);

pub struct AccountsCommand;

impl Command for AccountsCommand {
    fn name(&self) -> &str {
        "accounts"
    }

    fn description(&self) -> &str {
        "List, inspect, retrieve or delete privileged accounts"
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
                let query = AccountQuery {
                    search: ex.flag("search").map(str::to_string),
                    safe: ex.flag("safe").map(str::to_string),
                    limit: ex.parse_flag("limit")?,
                    offset: ex.parse_flag("offset")?,
                };
                let session = ctx.require_session()?;
                let client = session.client();
                let accounts = ctx.run(client.list_accounts(session.token(), &query))??;
                ctx.output.format(&accounts)
            }
            "get" => {
                let id = required(&ex.positional, 0, "accounts get <id>")?;
                let session = ctx.require_session()?;
                let client = session.client();
                let account = ctx.run(client.get_account(session.token(), id))??;
                ctx.output.format(&account)
            }
            "password" => {
                let id = required(&ex.positional, 0, "accounts password <id> [--reason=<text>]")?;
                let session = ctx.require_session()?;
                let client = session.client();
                let password =
                    ctx.run(client.retrieve_password(session.token(), id, ex.flag("reason")))??;
                info!(account = %id, "Password retrieved");
                let record = Record::new()
                    .field_as("account_id", "accountId", id)
                    .field_as("password", "password", password);
                ctx.output.format(&record)
            }
            "delete" => {
                let id = required(&ex.positional, 0, "accounts delete <id> [--force]")?;
                let session = ctx.require_session()?;
                let confirmed = ex.bool_flag("force")
                    || ex.bool_flag("yes")
                    || dialoguer::Confirm::new()
                        .with_prompt(format!("Delete account {}?", id))
                        .default(false)
                        .interact()?;
                if !confirmed {
                    return ctx.output.message("Cancelled.");
                }
                let client = session.client();
                ctx.run(client.delete_account(session.token(), id))??;
                info!(account = %id, "Account deleted");
                ctx.output.message(format!("Account {} deleted.", id))
            }
            other => Err(unknown_subcommand("accounts", other, USAGE)),
        }
    }
}
