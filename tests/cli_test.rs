/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use common::VaultBuilder;
use predicates::prelude::*;

fn vault_tasks_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vault-tasks"))
}

#[test]
fn test_cli_scan_publishes_output() {
    let vault = VaultBuilder::new()
        .with_note("a.md", "- [ ] write spec\n- [x] done already")
        .with_note("b.md", "#session 25m focus block")
        .build();

    vault_tasks_cmd()
        .arg("scan")
        .arg(vault.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Indexed 2 documents"))
        .stderr(predicate::str::contains("Published"));

    let output = fs::read_to_string(vault.path().join("output.md")).unwrap();
    assert_eq!(
        output,
        "## Tasks\n\n\
         - [ ] write spec (a.md:1)\n\
         - [x] done already (a.md:2)\n\
         \n\
         ## Sessions\n\n\
         - 25m focus block (b.md:1)\n"
    );
}

#[test]
fn test_cli_scan_twice_is_stable() {
    let vault = VaultBuilder::new().with_note("a.md", "- [ ] task").build();

    vault_tasks_cmd().arg("scan").arg(vault.path()).assert().success();
    let first = fs::read_to_string(vault.path().join("output.md")).unwrap();

    // The published output must not be re-indexed on the second pass.
    vault_tasks_cmd().arg("scan").arg(vault.path()).assert().success();
    let second = fs::read_to_string(vault.path().join("output.md")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_cli_scan_reports_warnings_but_succeeds() {
    let vault = VaultBuilder::new().with_note("bad.md", "- [ broken\n- [ ] ok").build();

    vault_tasks_cmd()
        .arg("scan")
        .arg(vault.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("bad.md:1"))
        .stderr(predicate::str::contains("unclosed checkbox bracket"));

    let output = fs::read_to_string(vault.path().join("output.md")).unwrap();
    assert!(output.contains("- [ ] ok (bad.md:2)"));
}

#[test]
fn test_cli_scan_empty_vault_publishes_empty_output() {
    let vault = VaultBuilder::new().build();

    vault_tasks_cmd()
        .arg("scan")
        .arg(vault.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Indexed 0 documents"));

    let output = fs::read_to_string(vault.path().join("output.md")).unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_cli_scan_custom_output_path() {
    let vault = VaultBuilder::new().with_note("a.md", "- [ ] task").build();

    vault_tasks_cmd()
        .arg("scan")
        .arg(vault.path())
        .arg("--output")
        .arg("aggregated.md")
        .assert()
        .success();

    assert!(vault.path().join("aggregated.md").exists());
    assert!(!vault.path().join("output.md").exists());
}

#[test]
fn test_cli_scan_with_config_file() {
    let vault = VaultBuilder::new().with_note("a.md", "* [ ] starred task").build();
    let config_path = vault.path().join("config.json");
    fs::write(&config_path, r#"{"star_bullets": true}"#).unwrap();

    vault_tasks_cmd()
        .arg("scan")
        .arg(vault.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let output = fs::read_to_string(vault.path().join("output.md")).unwrap();
    assert!(output.contains("starred task"));
}

#[test]
fn test_cli_stats_command() {
    let vault = VaultBuilder::new()
        .with_note("a.md", "- [ ] open one\n- [ ] open two\n- [x] closed")
        .with_note("log.md", "#session 25m a\n#session 1h b")
        .build();

    vault_tasks_cmd()
        .arg("stats")
        .arg(vault.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault Task Statistics"))
        .stdout(predicate::str::contains("Documents indexed: 2"))
        .stdout(predicate::str::contains("Total records: 5"))
        .stdout(predicate::str::contains("Open tasks: 2"))
        .stdout(predicate::str::contains("Done tasks: 1"))
        .stdout(predicate::str::contains("Sessions: 2"))
        .stdout(predicate::str::contains("Total session time: 1h25m"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    vault_tasks_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    vault_tasks_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_cli_scan_missing_vault_fails() {
    vault_tasks_cmd().arg("scan").arg("/nonexistent/vault/path").assert().failure();
}
