//! Vault API client boundary.
//!
//! The shell core only depends on the [`VaultClient`] and [`Connector`] traits.
//! [`http`] provides the REST implementation used by the binary.

use crate::error::{ApiError, ShellError};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub mod http;
pub mod model;
pub mod session;

pub use model::{
    Account, AccountQuery, CcpCredential, Platform, Safe, SecretManagement, ServerInfo, User,
};
pub use session::{Session, SessionStatus};

/// Logon method understood by the vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMethod {
    #[default]
    CyberArk,
    Ldap,
    Radius,
    Windows,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 4] = [
        AuthMethod::CyberArk,
        AuthMethod::Ldap,
        AuthMethod::Radius,
        AuthMethod::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::CyberArk => "cyberark",
            AuthMethod::Ldap => "ldap",
            AuthMethod::Radius => "radius",
            AuthMethod::Windows => "windows",
        }
    }

    /// Path segment used by the logon endpoint.
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            AuthMethod::CyberArk => "CyberArk",
            AuthMethod::Ldap => "LDAP",
            AuthMethod::Radius => "RADIUS",
            AuthMethod::Windows => "Windows",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        AuthMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lowered)
            .ok_or_else(|| {
                ShellError::Parse(format!(
                    "invalid auth method '{}' (expected cyberark, ldap, radius or windows)",
                    s
                ))
            })
    }
}

/// Logon credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub method: AuthMethod,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("method", &self.method)
            .finish()
    }
}

/// Settings used to build a client for one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server: String,
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &crate::config::ShellConfig) -> Self {
        Self {
            server: config.server.clone(),
            verify_tls: config.verify_tls,
            timeout: config.timeout(),
        }
    }
}

/// Typed vault operations. Every call either succeeds with a value or fails with an [`ApiError`].
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// Server identity and enabled logon methods. Does not require a session.
    async fn verify(&self) -> Result<ServerInfo, ApiError>;

    /// Authenticate and return a session token.
    async fn logon(&self, credentials: &Credentials) -> Result<String, ApiError>;

    async fn logoff(&self, token: &str) -> Result<(), ApiError>;

    async fn list_accounts(&self, token: &str, query: &AccountQuery)
        -> Result<Vec<Account>, ApiError>;

    async fn get_account(&self, token: &str, id: &str) -> Result<Account, ApiError>;

    async fn retrieve_password(
        &self,
        token: &str,
        id: &str,
        reason: Option<&str>,
    ) -> Result<String, ApiError>;

    async fn delete_account(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn list_safes(&self, token: &str, search: Option<&str>) -> Result<Vec<Safe>, ApiError>;

    async fn get_safe(&self, token: &str, name: &str) -> Result<Safe, ApiError>;

    async fn list_users(&self, token: &str, search: Option<&str>) -> Result<Vec<User>, ApiError>;

    async fn get_user(&self, token: &str, id: i64) -> Result<User, ApiError>;

    async fn list_platforms(&self, token: &str, active_only: bool)
        -> Result<Vec<Platform>, ApiError>;

    /// Fetch a logon credential from the central credential provider.
    async fn fetch_ccp_credential(
        &self,
        ccp: &crate::config::CcpConfig,
    ) -> Result<CcpCredential, ApiError>;
}

/// Creates clients for a server. Held by the shell, lent to `connect`.
pub trait Connector: Send + Sync {
    fn connect(&self, settings: &ClientSettings) -> Result<Arc<dyn VaultClient>, ApiError>;
}
