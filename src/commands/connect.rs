//! Session lifecycle: `connect`, `disconnect`, `status`.

use crate::client::{AuthMethod, ClientSettings, Credentials, Session, SessionStatus};
use crate::error::{ApiError, ShellError};
use crate::shell::{Command, ExecutionContext};
use clap::Parser;
use tracing::{info, warn};

/// Environment variable supplying the logon password non-interactively.
pub const PASSWORD_ENV: &str = "PAMSH_PASSWORD";

const CONNECT_USAGE: &str =
    "connect [--server=<url>] [--user=<name>] [--auth=<method>] [--password=<pw>] [--ccp]";

#[derive(Parser, Debug)]
#[command(name = "connect", about = "Log on to the vault")]
struct ConnectArgs {
    /// Vault URL (defaults to the configured server)
    #[arg(long)]
    server: Option<String>,

    /// User name (defaults to the configured user)
    #[arg(long, short = 'u', alias = "username")]
    user: Option<String>,

    /// Authentication method (cyberark, ldap, radius, windows)
    #[arg(long, alias = "auth-method")]
    auth: Option<String>,

    /// Password; otherwise PAMSH_PASSWORD, the credential provider or a prompt
    #[arg(long)]
    password: Option<String>,

    /// Fetch the logon credential from the configured credential provider
    #[arg(long)]
    ccp: bool,
}

pub struct ConnectCommand;

impl Command for ConnectCommand {
    fn name(&self) -> &str {
        "connect"
    }

    fn description(&self) -> &str {
        "Log on to the vault and open a session"
    }

    fn usage(&self) -> &str {
        CONNECT_USAGE
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), ShellError> {
        let parsed = match ConnectArgs::try_parse_from(
            std::iter::once("connect").chain(args.iter().map(String::as_str)),
        ) {
            Ok(parsed) => parsed,
            Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelp => {
                return ctx.output.message(e.to_string().trim_end());
            }
            Err(e) => {
                let first = e.to_string();
                let first = first.lines().next().unwrap_or_default();
                let first = first.trim_start_matches("error: ");
                return Err(ShellError::Usage(format!("{}; {}", first, CONNECT_USAGE)));
            }
        };

        if let Some(session) = ctx.session.as_ref().filter(|s| s.is_valid()) {
            return Err(ShellError::Usage(format!(
                "already connected to {} as {}; run 'disconnect' first",
                session.server(),
                session.username()
            )));
        }

        // The server override is committed to the shell config only after logon.
        let mut config = ctx.config.clone();
        if let Some(server) = &parsed.server {
            config.set("server", server)?;
        }
        let method = match &parsed.auth {
            Some(auth) => auth.parse::<AuthMethod>()?,
            None => config.auth_method(),
        };

        let settings = ClientSettings::from_config(&config);
        let client = ctx.connector.connect(&settings)?;

        let mut username = parsed.user.clone().or_else(|| config.username.clone());
        let password = match parsed.password.clone() {
            Some(password) => password,
            None => match std::env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty()) {
                Some(password) => password,
                None if parsed.ccp => {
                    let ccp = config.ccp.clone().ok_or_else(|| {
                        ShellError::Config(
                            "no [ccp] block configured for credential provider logon".to_string(),
                        )
                    })?;
                    let credential = ctx.run(client.fetch_ccp_credential(&ccp))??;
                    if username.is_none() {
                        username = credential.user_name.clone();
                    }
                    credential.content
                }
                None => {
                    let name = prompt_username(username.as_deref())?;
                    username = Some(name);
                    dialoguer::Password::new()
                        .with_prompt("Password")
                        .interact()?
                }
            },
        };
        let username = match username {
            Some(name) => name,
            None => prompt_username(None)?,
        };

        let credentials = Credentials {
            username: username.clone(),
            password,
            method,
        };
        let token = ctx.run(client.logon(&credentials))??;
        ctx.config.server = config.server;
        let session = Session::new(client, token, settings.server.clone(), username, method);
        info!(server = %session.server(), user = %session.username(), method = %method, "Connected");
        let message = format!("Connected to {} as {}", session.server(), session.username());
        *ctx.session = Some(session);
        ctx.output.message(message)
    }
}

/// Ask for a user name unless one is already known.
fn prompt_username(known: Option<&str>) -> Result<String, ShellError> {
    match known {
        Some(name) => Ok(name.to_string()),
        None => Ok(dialoguer::Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?),
    }
}

pub struct DisconnectCommand;

impl Command for DisconnectCommand {
    fn name(&self) -> &str {
        "disconnect"
    }

    fn description(&self) -> &str {
        "Log off and close the current session"
    }

    fn usage(&self) -> &str {
        "disconnect"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &[String]) -> Result<(), ShellError> {
        let Some(session) = ctx.session.take() else {
            return ctx.output.message("Not connected.");
        };
        if session.is_valid() {
            let client = session.client();
            match ctx.run(client.logoff(session.token()))? {
                Ok(()) => {}
                Err(ApiError::Unauthorized(_)) => {}
                Err(e) => warn!(error = %e, "Logoff failed, dropping session anyway"),
            }
        }
        info!(server = %session.server(), "Disconnected");
        ctx.output.message(format!("Disconnected from {}", session.server()))
    }
}

pub struct StatusCommand;

impl Command for StatusCommand {
    fn name(&self) -> &str {
        "status"
    }

    fn description(&self) -> &str {
        "Show the current session"
    }

    fn usage(&self) -> &str {
        "status"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &[String]) -> Result<(), ShellError> {
        let status = match ctx.session.as_ref() {
            Some(session) => session.status(),
            None => SessionStatus::disconnected(),
        };
        ctx.output.format(&status)
    }
}
