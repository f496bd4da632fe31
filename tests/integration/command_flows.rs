//! End-to-end command behavior against the fake vault.

use pamsh::config::{CcpConfig, ShellConfig};
use pamsh::error::{ApiError, ShellError};

use crate::integration::TestShell;

fn connected() -> TestShell {
    let mut t = TestShell::new();
    t.shell
        .run_single("connect --user=admin --password=secret")
        .unwrap();
    t
}

#[test]
fn test_session_gated_commands_require_connect() {
    let mut t = TestShell::new();
    for line in [
        "accounts list",
        "accounts get 12_3",
        "accounts password 12_3",
        "accounts delete 12_3 --force",
        "safes list",
        "safes get Admins",
        "users list",
        "users get 7",
        "platforms list",
    ] {
        let err = t.shell.execute_line(line).unwrap_err();
        assert!(
            matches!(err, ShellError::NotConnected),
            "{} should require a session, got {:?}",
            line,
            err
        );
    }
    assert!(t.calls().is_empty(), "no client calls without a session");
}

#[test]
fn test_connect_and_status() {
    let mut t = connected();
    assert!(t.out.text().contains("Connected to https://vault.test as admin"));

    t.shell.execute_line("set output json").unwrap();
    t.shell.execute_line("status").unwrap();
    let out = t.out.text();
    let start = out.find('{').unwrap();
    let status: serde_json::Value = serde_json::from_str(&out[start..]).unwrap();
    assert_eq!(status["connected"], true);
    assert_eq!(status["username"], "admin");
    assert_eq!(status["authMethod"], "cyberark");
}

#[test]
fn test_connect_twice_is_rejected() {
    let mut t = connected();
    let err = t
        .shell
        .execute_line("connect --user=admin --password=secret")
        .unwrap_err();
    assert!(matches!(err, ShellError::Usage(ref msg) if msg.contains("already connected")));
}

#[test]
fn test_connect_bad_flag_is_usage_error() {
    let mut t = TestShell::new();
    let err = t.shell.execute_line("connect --bogus").unwrap_err();
    assert!(matches!(err, ShellError::Usage(_)));
}

#[test]
fn test_connect_bad_auth_method() {
    let mut t = TestShell::new();
    let err = t
        .shell
        .execute_line("connect --user=a --password=b --auth=saml")
        .unwrap_err();
    assert!(matches!(err, ShellError::Parse(_)));
}

#[test]
fn test_connect_without_server() {
    let mut t = TestShell::with_config(ShellConfig::default());
    let err = t
        .shell
        .execute_line("connect --user=admin --password=secret")
        .unwrap_err();
    assert!(matches!(err, ShellError::Api(ApiError::Config(_))));
}

#[test]
fn test_connect_with_server_flag_updates_config() {
    let mut t = TestShell::with_config(ShellConfig::default());
    t.shell
        .execute_line("connect --server=https://other.test/ --user=admin --password=secret")
        .unwrap();
    assert_eq!(t.shell.config().server, "https://other.test");
    assert_eq!(t.shell.session().unwrap().server(), "https://other.test");
}

#[test]
fn test_failed_connect_keeps_configured_server() {
    let mut t = TestShell::new();
    let err = t
        .shell
        .execute_line("connect --server=https://other.test --user=admin --password=wrong")
        .unwrap_err();
    assert!(matches!(err, ShellError::Api(ApiError::Unauthorized(_))));
    assert_eq!(t.shell.config().server, "https://vault.test");
    assert!(t.shell.session().is_none());

    t.shell.execute_line("set").unwrap();
    assert!(!t.out.text().contains("other.test"));
}

#[test]
fn test_connect_ccp_requires_config() {
    let mut t = TestShell::new();
    if std::env::var("PAMSH_PASSWORD").is_ok() {
        return;
    }
    let err = t.shell.execute_line("connect --ccp").unwrap_err();
    assert!(matches!(err, ShellError::Config(_)));
}

#[test]
fn test_connect_ccp_supplies_credentials() {
    if std::env::var("PAMSH_PASSWORD").is_ok() {
        return;
    }
    let config = ShellConfig {
        server: "https://vault.test".to_string(),
        ccp: Some(CcpConfig {
            url: "https://ccp.test".to_string(),
            app_id: "pamsh".to_string(),
            safe: "Shell".to_string(),
            object: "logon".to_string(),
        }),
        ..ShellConfig::default()
    };
    let mut t = TestShell::with_config(config);
    t.shell.execute_line("connect --ccp").unwrap();
    assert_eq!(t.calls(), ["fetch_ccp_credential", "logon:ccp-user"]);
    assert_eq!(t.shell.session().unwrap().username(), "ccp-user");
}

#[test]
fn test_accounts_get_renders_record_table() {
    let mut t = connected();
    t.shell.execute_line("accounts get 12_3").unwrap();
    let out = t.out.text();
    assert!(out.contains("FIELD"));
    assert!(out.contains("VALUE"));
    assert!(out.contains("12_3"));
    assert!(out.contains("SAFENAME"));
    assert!(out.contains("Admins"));
    // Unset address is suppressed from the record table.
    assert!(!out.contains("ADDRESS"));
}

#[test]
fn test_accounts_get_missing_surfaces_api_error() {
    let mut t = connected();
    let err = t.shell.execute_line("accounts get 99_9").unwrap_err();
    assert_eq!(err.to_string(), "Not found: account 99_9");
}

#[test]
fn test_accounts_get_requires_id() {
    let mut t = connected();
    assert!(matches!(
        t.shell.execute_line("accounts get"),
        Err(ShellError::Usage(_))
    ));
}

#[test]
fn test_accounts_list_filters() {
    let mut t = connected();
    t.shell.execute_line("set output json").unwrap();
    t.shell
        .execute_line("accounts list --safe=DBA --limit=5")
        .unwrap();
    let out = t.out.text();
    let parsed: serde_json::Value = serde_json::from_str(&out[out.find('[').unwrap()..]).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["12_4"]);
}

#[test]
fn test_accounts_list_bad_limit() {
    let mut t = connected();
    assert!(matches!(
        t.shell.execute_line("accounts list --limit=many"),
        Err(ShellError::Parse(_))
    ));
}

#[test]
fn test_accounts_password_and_delete() {
    let mut t = connected();
    t.shell
        .execute_line("accounts password 12_3 --reason=\"maintenance window\"")
        .unwrap();
    assert!(t.out.text().contains("s3cret"));

    t.shell.execute_line("accounts delete 12_3 --force").unwrap();
    assert!(t.out.text().contains("Account 12_3 deleted."));
    assert_eq!(
        t.calls(),
        ["logon:admin", "retrieve_password:12_3", "delete_account:12_3"]
    );
}

#[test]
fn test_unknown_subcommand() {
    let mut t = connected();
    let err = t.shell.execute_line("accounts rename 12_3").unwrap_err();
    assert!(matches!(err, ShellError::Usage(ref msg) if msg.contains("rename")));
}

#[test]
fn test_empty_collections_render_no_data() {
    let mut t = connected();
    t.shell.execute_line("safes list").unwrap();
    assert!(t.out.text().contains("No data to display."));
}

#[test]
fn test_users_get_requires_numeric_id() {
    let mut t = connected();
    assert!(matches!(
        t.shell.execute_line("users get admin"),
        Err(ShellError::Parse(_))
    ));
}

#[test]
fn test_disconnect_logs_off() {
    let mut t = connected();
    t.shell.execute_line("disconnect").unwrap();
    assert!(t.shell.session().is_none());
    assert_eq!(t.calls(), ["logon:admin", "logoff"]);

    t.shell.execute_line("disconnect").unwrap();
    assert!(t.out.text().contains("Not connected."));
}

#[test]
fn test_monitor_health_without_session() {
    let mut t = TestShell::new();
    t.shell.execute_line("monitor health").unwrap();
    assert_eq!(t.calls(), ["verify"]);
    assert!(t.out.text().contains("PasswordVault"));
}

#[test]
fn test_help_listing_and_detail() {
    let mut t = TestShell::new();
    t.shell.execute_line("help").unwrap();
    let listing = t.out.text();
    for name in ["accounts", "connect", "help", "set", "version"] {
        assert!(listing.contains(name), "help should list {}", name);
    }

    t.shell.execute_line("help accounts").unwrap();
    assert!(t.out.text().contains("accounts list"));

    assert!(matches!(
        t.shell.execute_line("help nope"),
        Err(ShellError::UnknownCommand(_))
    ));
}

#[test]
fn test_set_shows_and_changes_settings() {
    let mut t = TestShell::new();
    t.shell.execute_line("set").unwrap();
    let out = t.out.text();
    assert!(out.contains("KEY"));
    assert!(out.contains("https://vault.test"));

    t.shell.execute_line("set timeout 90").unwrap();
    assert_eq!(t.shell.config().timeout_secs, 90);
    t.shell.execute_line("set verify-tls off").unwrap();
    assert!(!t.shell.config().verify_tls);

    assert!(matches!(
        t.shell.execute_line("set output xml"),
        Err(ShellError::Parse(_))
    ));
    assert!(matches!(
        t.shell.execute_line("set colour red"),
        Err(ShellError::Usage(_))
    ));
    assert!(matches!(
        t.shell.execute_line("set output"),
        Err(ShellError::Usage(_))
    ));
}

#[test]
fn test_config_save_writes_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut t = TestShell::new();
    t.shell.execute_line("set output yaml").unwrap();
    t.shell
        .execute_line(&format!("config save \"{}\"", path.display()))
        .unwrap();

    let saved = pamsh::config::ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(saved.output_format, "yaml");
    assert_eq!(saved.server, "https://vault.test");
}
