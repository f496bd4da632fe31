//! Dispatch and run-mode behavior: script fail-fast, interactive recovery,
//! exit handling and cleanup.

use pamsh::error::{ApiError, ShellError};
use pamsh::output::OutputFormat;
use pamsh::shell::{LineOutcome, ReadEvent};

use crate::integration::{numbered, ScriptedReader, TestShell};

#[test]
fn test_script_aborts_on_first_failure() {
    let mut t = TestShell::new();
    let lines = numbered(&["connect --user=admin --password=wrong", "accounts list"]);

    let err = t.shell.run_lines(&lines).unwrap_err();
    match err {
        ShellError::Aborted { line, source } => {
            assert_eq!(line, 1);
            assert!(matches!(*source, ShellError::Api(ApiError::Unauthorized(_))));
        }
        other => panic!("expected aborted error, got {:?}", other),
    }
    assert_eq!(t.calls(), ["logon:admin"]);
}

#[test]
fn test_script_reports_original_line_number() {
    let mut t = TestShell::new();
    let lines = vec![(1, "status".to_string()), (4, "accounts list".to_string())];
    let err = t.shell.run_lines(&lines).unwrap_err();
    assert!(matches!(err, ShellError::Aborted { line: 4, .. }));
    assert_eq!(
        err.to_string(),
        "line 4: Not connected. Use 'connect' to open a session."
    );
}

#[test]
fn test_interactive_reports_and_continues() {
    let mut t = TestShell::new();
    let mut reader =
        ScriptedReader::lines(&["connect --user=admin --password=wrong", "accounts list"]);

    t.shell.run_interactive(&mut reader).unwrap();

    let errors = t.err.text();
    assert!(errors.contains("Error: Authentication failed: invalid credentials"));
    assert!(errors.contains("Error: Not connected. Use 'connect' to open a session."));
    assert_eq!(errors.lines().count(), 2);
    assert_eq!(t.calls(), ["logon:admin"]);
}

#[test]
fn test_set_output_json_applies_to_later_commands() {
    let mut t = TestShell::new();
    let lines = numbered(&[
        "connect --user=admin --password=secret",
        "set output json",
        "accounts list",
    ]);
    t.shell.run_lines(&lines).unwrap();

    assert_eq!(t.format(), OutputFormat::Json);
    assert_eq!(t.shell.config().output_format, "json");

    let out = t.out.text();
    let start = out.find('[').expect("json array in output");
    let parsed: serde_json::Value = serde_json::from_str(&out[start..]).unwrap();
    let accounts = parsed.as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["id"], "12_3");
    assert_eq!(accounts[0]["userName"], "admin");
}

#[test]
fn test_exit_stops_script() {
    let mut t = TestShell::new();
    let lines = numbered(&["status", "exit", "accounts list"]);
    t.shell.run_lines(&lines).unwrap();
    assert!(t.calls().is_empty());
}

#[test]
fn test_exit_and_quit_as_line_or_first_token() {
    let mut t = TestShell::new();
    assert_eq!(t.shell.execute_line("  exit  ").unwrap(), LineOutcome::Exit);
    assert_eq!(t.shell.execute_line("quit").unwrap(), LineOutcome::Exit);
    assert_eq!(t.shell.execute_line("exit now").unwrap(), LineOutcome::Exit);
    assert_eq!(t.shell.execute_line("quit --force").unwrap(), LineOutcome::Exit);
    assert!(matches!(
        t.shell.execute_line("exits"),
        Err(ShellError::UnknownCommand(name)) if name == "exits"
    ));
}

#[test]
fn test_blank_lines_are_no_ops() {
    let mut t = TestShell::new();
    assert_eq!(t.shell.execute_line("").unwrap(), LineOutcome::Continue);
    assert_eq!(t.shell.execute_line("   \t ").unwrap(), LineOutcome::Continue);
    assert!(t.out.text().is_empty());
    assert!(t.err.text().is_empty());
}

#[test]
fn test_unknown_command() {
    let mut t = TestShell::new();
    let err = t.shell.execute_line("frobnicate now").unwrap_err();
    assert!(matches!(err, ShellError::UnknownCommand(ref name) if name == "frobnicate"));
}

#[test]
fn test_interrupt_prints_hint_and_continues() {
    let mut t = TestShell::new();
    let mut reader = ScriptedReader::new(vec![
        ReadEvent::Interrupted,
        ReadEvent::Line("version".to_string()),
        ReadEvent::Eof,
    ]);
    t.shell.run_interactive(&mut reader).unwrap();
    assert!(t.err.text().contains("Use 'exit' or Ctrl-D to quit"));
    assert!(t.out.text().starts_with("pamsh "));
}

#[test]
fn test_prompt_reflects_session() {
    let mut t = TestShell::new();
    let mut reader =
        ScriptedReader::lines(&["connect --user=admin --password=secret", "disconnect"]);
    t.shell.run_interactive(&mut reader).unwrap();
    assert_eq!(reader.prompts[0], "pamsh> ");
    assert_eq!(reader.prompts[1], "pamsh(admin@https://vault.test)> ");
    assert_eq!(reader.prompts[2], "pamsh> ");
}

#[test]
fn test_single_command_mode() {
    let mut t = TestShell::new();
    t.shell.run_single("version").unwrap();
    assert_eq!(
        t.out.text(),
        format!("pamsh {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_shutdown_logs_off_live_session() {
    let mut t = TestShell::new();
    t.shell
        .run_single("connect --user=admin --password=secret")
        .unwrap();
    assert!(t.shell.session().is_some());

    t.shell.shutdown();
    assert!(t.shell.session().is_none());
    assert_eq!(t.calls(), ["logon:admin", "logoff"]);

    // Second shutdown is a no-op.
    t.shell.shutdown();
    assert_eq!(t.calls().len(), 2);
}

#[test]
fn test_commands_fail_after_shutdown() {
    let mut t = TestShell::new();
    t.shell.shutdown();
    let err = t.shell.execute_line("monitor health").unwrap_err();
    assert!(matches!(err, ShellError::Cancelled));
}
