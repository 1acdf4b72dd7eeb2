//! CLI integration tests for presto-import.
//!
//! These tests cover argument parsing, help output, and the failures that
//! must happen before any statement reaches the server.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the presto-import binary.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("presto-import").unwrap();
    cmd.env_remove("PRESTO_PASSWORD");
    cmd
}

/// Server address that refuses connections.
const DEAD_SERVER: &str = "127.0.0.1:9";

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_lists_import_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("--user"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--table"))
        .stdout(predicate::str::contains("--batch-size"))
        .stdout(predicate::str::contains("--drop-create"))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--input-format"))
        .stdout(predicate::str::contains("--ignore-errors"));
}

#[test]
fn test_help_shows_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:8080"))
        .stdout(predicate::str::contains("[default: 1000]"))
        .stdout(predicate::str::contains("csv_unquoted"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("presto-import"));
}

#[test]
fn test_output_flags_exist() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn test_invalid_input_format_rejected() {
    cmd()
        .args(["--table", "hive.default.t", "--file", "data.csv"])
        .args(["--input-format", "parquet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown input format 'parquet'"));
}

#[test]
fn test_drop_create_requires_bool() {
    cmd()
        .args(["--table", "hive.default.t", "--file", "data.csv"])
        .args(["--drop-create", "maybe"])
        .assert()
        .failure();
}

// =============================================================================
// Validation Errors
// =============================================================================

#[test]
fn test_missing_table_fails() {
    cmd()
        .args(["--user", "loader", "--file", "data.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("import.table is required"));
}

#[test]
fn test_missing_file_flag_fails() {
    cmd()
        .args(["--user", "loader", "--table", "hive.default.t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("import.file is required"));
}

#[test]
fn test_malformed_table_fails() {
    cmd()
        .args(["--user", "loader", "--file", "data.csv"])
        .args(["--table", "default.orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed table identifier 'default.orders'"));
}

#[test]
fn test_zero_batch_size_fails() {
    cmd()
        .args(["--user", "loader", "--table", "hive.default.t", "--file", "data.csv"])
        .args(["--batch-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch_size must be at least 1"));
}

#[test]
fn test_missing_user_fails() {
    cmd()
        .env_remove("USER")
        .env_remove("USERNAME")
        .args(["--table", "hive.default.t", "--file", "data.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("client.user is required"));
}

// =============================================================================
// Failures Before Any Statement
// =============================================================================

#[test]
fn test_missing_input_file_fails_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    cmd()
        .args(["--server", DEAD_SERVER, "--user", "loader"])
        .args(["--table", "hive.default.t", "--drop-create", "true"])
        .args(["--file", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_password_without_terminal_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1,a").unwrap();

    cmd()
        .args(["--server", DEAD_SERVER, "--user", "loader", "--password"])
        .args(["--table", "hive.default.t"])
        .args(["--file", file.path().to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No console from which to read password"));
}

#[test]
fn test_unreachable_server_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1,a").unwrap();

    cmd()
        .args(["--server", DEAD_SERVER, "--user", "loader"])
        .args(["--table", "hive.default.t", "--drop-create", "false"])
        .args(["--file", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection failed"));
}

// =============================================================================
// Config File Tests
// =============================================================================

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--config", "nonexistent_config_file.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_invalid_yaml_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "client: [").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML error"));
}

#[test]
fn test_flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "client:").unwrap();
    writeln!(file, "  user: loader").unwrap();
    writeln!(file, "import:").unwrap();
    writeln!(file, "  table: hive.default.orders").unwrap();
    writeln!(file, "  file: data.csv").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap()])
        .args(["--table", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed table identifier 'orders'"));
}
