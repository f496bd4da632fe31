//! Shared test utilities for integration tests
//!
//! Provides XDG isolation, an in-memory output buffer and a scripted fake vault
//! client so shell behavior can be exercised without a server.

use async_trait::async_trait;
use pamsh::client::{
    Account, AccountQuery, CcpCredential, ClientSettings, Connector, Credentials, Platform, Safe,
    ServerInfo, User, VaultClient,
};
use pamsh::commands::default_registry;
use pamsh::config::{CcpConfig, ShellConfig};
use pamsh::error::{ApiError, ShellError};
use pamsh::output::{OutputFormat, OutputFormatter};
use pamsh::shell::{LineReader, ReadEvent, Shell};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    xdg_data_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            xdg_data_home: std::env::var("XDG_DATA_HOME").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("XDG_DATA_HOME", self.xdg_data_home);
    }
}

fn restore_var(key: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME and XDG_DATA_HOME pointing into `test_dir`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_data_home = test_dir.path().join("data");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_data_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    std::env::set_var("XDG_DATA_HOME", test_data_home.to_str().unwrap());

    let result = f();

    env_state.restore();
    result
}

/// Writer sharing its bytes with the test.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).to_string()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Calls observed by the fake client.
#[derive(Default)]
pub struct CallLog {
    pub calls: Vec<String>,
}

/// In-memory vault. Accepts a single user/password pair.
pub struct FakeVault {
    pub log: Arc<Mutex<CallLog>>,
    pub password: String,
    pub accounts: Vec<Account>,
}

impl FakeVault {
    fn record(&self, call: impl Into<String>) {
        self.log.lock().calls.push(call.into());
    }
}

pub const FAKE_TOKEN: &str = "token-123";

pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "12_3".to_string(),
            name: "Operating System-WinDomain-admin".to_string(),
            user_name: Some("admin".to_string()),
            safe_name: "Admins".to_string(),
            platform_id: "WinDomain".to_string(),
            created_time: Some(1_600_000_000),
            ..Default::default()
        },
        Account {
            id: "12_4".to_string(),
            name: "Database-Oracle-sys".to_string(),
            user_name: Some("sys".to_string()),
            safe_name: "DBA".to_string(),
            platform_id: "Oracle".to_string(),
            ..Default::default()
        },
    ]
}

fn check_token(token: &str) -> Result<(), ApiError> {
    if token == FAKE_TOKEN {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid token".to_string()))
    }
}

#[async_trait]
impl VaultClient for FakeVault {
    async fn verify(&self) -> Result<ServerInfo, ApiError> {
        self.record("verify");
        Ok(ServerInfo {
            application_name: "PasswordVault".to_string(),
            server_name: "Vault".to_string(),
            server_id: "1".to_string(),
            authentication_methods: Vec::new(),
        })
    }

    async fn logon(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.record(format!("logon:{}", credentials.username));
        if credentials.password == self.password {
            Ok(FAKE_TOKEN.to_string())
        } else {
            Err(ApiError::Unauthorized("invalid credentials".to_string()))
        }
    }

    async fn logoff(&self, token: &str) -> Result<(), ApiError> {
        self.record("logoff");
        check_token(token)
    }

    async fn list_accounts(
        &self,
        token: &str,
        query: &AccountQuery,
    ) -> Result<Vec<Account>, ApiError> {
        self.record("list_accounts");
        check_token(token)?;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self
            .accounts
            .iter()
            .filter(|a| query.safe.as_deref().map_or(true, |s| a.safe_name == s))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_account(&self, token: &str, id: &str) -> Result<Account, ApiError> {
        self.record(format!("get_account:{}", id));
        check_token(token)?;
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("account {}", id)))
    }

    async fn retrieve_password(
        &self,
        token: &str,
        id: &str,
        _reason: Option<&str>,
    ) -> Result<String, ApiError> {
        self.record(format!("retrieve_password:{}", id));
        check_token(token)?;
        Ok("s3cret".to_string())
    }

    async fn delete_account(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_account:{}", id));
        check_token(token)
    }

    async fn list_safes(&self, token: &str, _search: Option<&str>) -> Result<Vec<Safe>, ApiError> {
        self.record("list_safes");
        check_token(token)?;
        Ok(Vec::new())
    }

    async fn get_safe(&self, token: &str, name: &str) -> Result<Safe, ApiError> {
        self.record(format!("get_safe:{}", name));
        check_token(token)?;
        Err(ApiError::NotFound(format!("safe {}", name)))
    }

    async fn list_users(&self, token: &str, _search: Option<&str>) -> Result<Vec<User>, ApiError> {
        self.record("list_users");
        check_token(token)?;
        Ok(Vec::new())
    }

    async fn get_user(&self, token: &str, id: i64) -> Result<User, ApiError> {
        self.record(format!("get_user:{}", id));
        check_token(token)?;
        Err(ApiError::NotFound(format!("user {}", id)))
    }

    async fn list_platforms(
        &self,
        token: &str,
        _active_only: bool,
    ) -> Result<Vec<Platform>, ApiError> {
        self.record("list_platforms");
        check_token(token)?;
        Ok(Vec::new())
    }

    async fn fetch_ccp_credential(&self, _ccp: &CcpConfig) -> Result<CcpCredential, ApiError> {
        self.record("fetch_ccp_credential");
        Ok(CcpCredential {
            content: self.password.clone(),
            user_name: Some("ccp-user".to_string()),
            address: None,
        })
    }
}

/// Connector handing out one shared [`FakeVault`].
pub struct FakeConnector {
    pub vault: Arc<FakeVault>,
}

impl Connector for FakeConnector {
    fn connect(&self, settings: &ClientSettings) -> Result<Arc<dyn VaultClient>, ApiError> {
        if settings.server.is_empty() {
            return Err(ApiError::Config("No server configured".to_string()));
        }
        let client: Arc<dyn VaultClient> = self.vault.clone();
        Ok(client)
    }
}

/// A shell wired to a fake vault with captured stdout/stderr.
pub struct TestShell {
    pub shell: Shell,
    pub out: SharedBuffer,
    pub err: SharedBuffer,
    pub log: Arc<Mutex<CallLog>>,
}

impl TestShell {
    pub fn new() -> Self {
        let config = ShellConfig {
            server: "https://vault.test".to_string(),
            ..ShellConfig::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let log = Arc::new(Mutex::new(CallLog::default()));
        let vault = Arc::new(FakeVault {
            log: Arc::clone(&log),
            password: "secret".to_string(),
            accounts: sample_accounts(),
        });
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let format = config.output_format();
        let shell = Shell::new(default_registry(), config, Box::new(FakeConnector { vault }))
            .unwrap()
            .with_output(OutputFormatter::with_sink(format, Box::new(out.clone())))
            .with_error_sink(Box::new(err.clone()));
        Self {
            shell,
            out,
            err,
            log,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().calls.clone()
    }

    pub fn format(&self) -> OutputFormat {
        self.shell.output().format_kind()
    }
}

/// Replays a fixed list of read events.
pub struct ScriptedReader {
    events: VecDeque<ReadEvent>,
    pub prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new(events: Vec<ReadEvent>) -> Self {
        Self {
            events: events.into(),
            prompts: Vec::new(),
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| ReadEvent::Line(l.to_string())).collect())
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError> {
        self.prompts.push(prompt.to_string());
        Ok(self.events.pop_front().unwrap_or(ReadEvent::Eof))
    }
}

/// Numbered lines as produced by the script reader.
pub fn numbered(lines: &[&str]) -> Vec<(usize, String)> {
    lines
        .iter()
        .enumerate()
        .map(|(i, l)| (i + 1, l.to_string()))
        .collect()
}
