//! `set` and `config` commands.

use super::{split_subcommand, unknown_subcommand, SubcommandList};
use crate::config::{ConfigLoader, ShellConfig};
use crate::error::ShellError;
use crate::output::{Describe, DisplayValue};
use crate::shell::{Command, ExecutionContext, Subcommands};
use std::path::PathBuf;
use tracing::info;

const SET_USAGE: &str = "set [output|server|username|auth|timeout|history-size|verify-tls <value>]";
const CONFIG_USAGE: &str = "config show | config save [path] | config path";

static SET_SUBCOMMANDS: SubcommandList = SubcommandList(&[
    "auth",
    "history-size",
    "output",
    "server",
    "timeout",
    "username",
    "verify-tls",
]);

static CONFIG_SUBCOMMANDS: SubcommandList = SubcommandList(&["show", "save", "path"]);

/// Current settings in display order.
struct Settings<'a>(&'a ShellConfig);

impl Describe for Settings<'_> {
    fn describe(&self) -> DisplayValue {
        let c = self.0;
        DisplayValue::Map(vec![
            ("server".to_string(), DisplayValue::text(c.server.clone())),
            ("username".to_string(), c.username.clone().into()),
            ("auth".to_string(), DisplayValue::text(c.auth_method.clone())),
            ("output".to_string(), DisplayValue::text(c.output_format.clone())),
            ("timeout".to_string(), DisplayValue::Int(c.timeout_secs as i64)),
            ("history-size".to_string(), c.history_size.into()),
            ("verify-tls".to_string(), DisplayValue::Bool(c.verify_tls)),
            ("ccp".to_string(), DisplayValue::Bool(c.ccp.is_some())),
        ])
    }
}

pub struct SetCommand;

impl Command for SetCommand {
    fn name(&self) -> &str {
        "set"
    }

    fn description(&self) -> &str {
        "Show or change session settings (output format, server, ...)"
    }

    fn usage(&self) -> &str {
        SET_USAGE
    }

    fn subcommands(&self) -> Option<&dyn Subcommands> {
        Some(&SET_SUBCOMMANDS)
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        match args {
            [] => ctx.output.format(&Settings(ctx.config).describe()),
            [key, value] => {
                ctx.config.set(key, value)?;
                ctx.output.set_format(ctx.config.output_format());
                info!(key = %key, "Setting changed");
                ctx.output.message(format!("{} = {}", key, value))
            }
            _ => Err(ShellError::Usage(SET_USAGE.to_string())),
        }
    }
}

pub struct ConfigCommand;

impl Command for ConfigCommand {
    fn name(&self) -> &str {
        "config"
    }

    fn description(&self) -> &str {
        "Show, locate or save the configuration file"
    }

    fn usage(&self) -> &str {
        CONFIG_USAGE
    }

    fn subcommands(&self) -> Option<&dyn Subcommands> {
        Some(&CONFIG_SUBCOMMANDS)
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        let (sub, rest) = split_subcommand(args, CONFIG_USAGE)?;
        match sub {
            "show" => ctx.output.format(&Settings(ctx.config).describe()),
            "path" => {
                let path = default_path()?;
                ctx.output.message(path.display().to_string())
            }
            "save" => {
                let path = match rest.first() {
                    Some(p) => PathBuf::from(p),
                    None => default_path()?,
                };
                ConfigLoader::save(ctx.config, &path)?;
                info!(path = %path.display(), "Configuration saved");
                ctx.output
                    .message(format!("Configuration saved to {}", path.display()))
            }
            other => Err(unknown_subcommand("config", other, CONFIG_USAGE)),
        }
    }
}

fn default_path() -> Result<PathBuf, ShellError> {
    ConfigLoader::default_path()
        .ok_or_else(|| ShellError::Config("cannot determine the configuration directory".to_string()))
}
