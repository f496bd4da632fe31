//! Authenticated session handle.

use super::{AuthMethod, VaultClient};
use crate::output::{Describe, DisplayValue, Record};
use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Idle period after which the vault drops a session.
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: i64 = 20;

/// A logged-on session. Cheap to clone; the client is shared.
#[derive(Clone)]
pub struct Session {
    token: String,
    server: String,
    username: String,
    method: AuthMethod,
    connected_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    idle_timeout: Duration,
    client: Arc<dyn VaultClient>,
}

impl Session {
    pub fn new(
        client: Arc<dyn VaultClient>,
        token: String,
        server: impl Into<String>,
        username: impl Into<String>,
        method: AuthMethod,
    ) -> Self {
        let now = Utc::now();
        Self {
            token,
            server: server.into(),
            username: username.into(),
            method,
            connected_at: now,
            last_activity: now,
            idle_timeout: Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINUTES),
            client,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn method(&self) -> AuthMethod {
        self.method
    }

    pub fn client(&self) -> Arc<dyn VaultClient> {
        Arc::clone(&self.client)
    }

    /// A session is valid while it holds a token and has not been idle too long.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && now - self.last_activity < self.idle_timeout
    }

    /// Record activity, extending the idle window.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            connected: self.is_valid(),
            server: Some(self.server.clone()),
            username: Some(self.username.clone()),
            auth_method: Some(self.method),
            connected_at: Some(self.connected_at),
            last_activity: Some(self.last_activity),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("method", &self.method)
            .field("connected_at", &self.connected_at)
            .field("last_activity", &self.last_activity)
            .finish_non_exhaustive()
    }
}

/// Displayable snapshot of the current session, used by `status`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStatus {
    pub connected: bool,
    pub server: Option<String>,
    pub username: Option<String>,
    pub auth_method: Option<AuthMethod>,
    pub connected_at: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl SessionStatus {
    pub fn disconnected() -> Self {
        Self::default()
    }
}

impl Describe for SessionStatus {
    fn describe(&self) -> DisplayValue {
        Record::new()
            .field("connected", self.connected)
            .field("server", self.server.clone())
            .field("username", self.username.clone())
            .field("authMethod", self.auth_method.map(|m| m.as_str()))
            .field("connectedAt", DisplayValue::Timestamp(self.connected_at))
            .field("lastActivity", DisplayValue::Timestamp(self.last_activity))
            .describe()
    }
}

/// Structured output is the same record the table shows.
impl Serialize for SessionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.describe().serialize(serializer)
    }
}
