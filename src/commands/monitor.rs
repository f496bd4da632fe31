//! `monitor` command. Works without a session.

use super::{split_subcommand, unknown_subcommand, SubcommandList};
use crate::client::ClientSettings;
use crate::error::ShellError;
use crate::shell::{Command, ExecutionContext, Subcommands};
use tracing::debug;

const USAGE: &str = "monitor health";

static SUBCOMMANDS: SubcommandList = SubcommandList(&["health"]);

pub struct MonitorCommand;

impl Command for MonitorCommand {
    fn name(&self) -> &str {
        "monitor"
    }

    fn description(&self) -> &str {
        "Check server health"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    fn subcommands(&self) -> Option<&dyn Subcommands> {
        Some(&SUBCOMMANDS)
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        let (sub, _) = split_subcommand(args, USAGE)?;
        match sub {
            "health" => {
                // Reuse the session's client when connected; otherwise build one from config.
                let client = match ctx.session.as_ref() {
                    Some(session) => session.client(),
                    None => ctx
                        .connector
                        .connect(&ClientSettings::from_config(ctx.config))?,
                };
                let info = ctx.run(client.verify())??;
                debug!(server = %info.server_name, "Server verified");
                ctx.output.format(&info)
            }
            other => Err(unknown_subcommand("monitor", other, USAGE)),
        }
    }
}
