//! Integration tests for the sndoc binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VALID_INCIDENT: &str = r#"
project_name: ServiceNow ITSM導入プロジェクト
author:
  name: 山田太郎
  email: yamada@example.com
incident_types: [システム障害, パフォーマンス問題, ユーザーサポート]
"#;

const INVALID_INCIDENT: &str = r#"
project_name: ServiceNow ITSM導入プロジェクト
author:
  name: 山田太郎
  email: not-an-email
"#;

/// A scratch project with an isolated home directory.
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("home")).unwrap();
    fs::write(temp.path().join("valid.yaml"), VALID_INCIDENT).unwrap();
    fs::write(temp.path().join("invalid.yaml"), INVALID_INCIDENT).unwrap();
    temp
}

fn sndoc(temp: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sndoc"));
    cmd.current_dir(temp.path())
        .env("HOME", temp.path().join("home"))
        .env_remove("SNDOC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() {
    let temp = setup_project();
    sndoc(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn cli_validate_valid_document() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "--type", "incident_management", "--data", "valid.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Validation Report: Incident Management ==="))
        .stdout(predicate::str::contains("✅ PASSED"));
}

#[test]
fn cli_validate_invalid_document_fails_gate() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("[author.email]"));
}

#[test]
fn cli_info_only_mode_never_fails() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml", "--mode", "info-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ FAILED"));
}

#[test]
fn cli_strict_mode_still_prints_report() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml", "--mode", "strict"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Errors: 1"));
}

#[test]
fn cli_writes_report_file() {
    let temp = setup_project();
    sndoc(&temp)
        .args([
            "validate",
            "-t",
            "incident_management",
            "-d",
            "valid.yaml",
            "--format",
            "markdown",
            "--output",
            "reports/incident.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("report written to"));

    let report = fs::read_to_string(temp.path().join("reports/incident.md")).unwrap();
    assert!(report.starts_with("# Validation Report: Incident Management"));
}

#[test]
fn cli_output_without_extension_uses_format_extension() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "valid.yaml", "-f", "html", "-o", "reports/incident"])
        .assert()
        .success()
        .stdout(predicate::str::contains("incident.html"));

    let report = fs::read_to_string(temp.path().join("reports/incident.html")).unwrap();
    assert!(report.starts_with("<!DOCTYPE html>"));
}

#[test]
fn cli_config_accepts_format_aliases() {
    let temp = setup_project();
    fs::write(temp.path().join("sndoc.yaml"), "validation:\n  mode: STRICT\n  format: txt\n").unwrap();

    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("=== Validation Report: Incident Management ==="));
}

#[test]
fn cli_uses_discovered_config() {
    let temp = setup_project();
    fs::write(
        temp.path().join("sndoc.yaml"),
        "validation:\n  mode: info_only\n  format: json\n",
    )
    .unwrap();

    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"Incident Management\""));
}

#[test]
fn cli_flags_override_config() {
    let temp = setup_project();
    fs::write(temp.path().join("sndoc.yaml"), "validation:\n  mode: info_only\n").unwrap();

    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "invalid.yaml", "-m", "permissive"])
        .assert()
        .code(3);
}

#[test]
fn cli_apply_defaults_fills_author() {
    let temp = setup_project();
    fs::write(temp.path().join("partial.yaml"), "project_name: ITSM導入\n").unwrap();
    fs::create_dir_all(temp.path().join("config")).unwrap();
    fs::write(
        temp.path().join("config/sndoc.yaml"),
        "defaults:\n  author:\n    name: 既定作成者\n    email: default@example.com\n",
    )
    .unwrap();

    sndoc(&temp)
        .args(["validate", "-t", "cmdb_design", "-d", "partial.yaml"])
        .assert()
        .code(3);

    sndoc(&temp)
        .args(["validate", "-t", "cmdb_design", "-d", "partial.yaml", "--apply-defaults"])
        .assert()
        .success();
}

#[test]
fn cli_rejects_unknown_type() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "no_such_document", "-d", "valid.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no_such_document"));
}

#[test]
fn cli_missing_data_file() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["validate", "-t", "incident_management", "-d", "absent.yaml"])
        .assert()
        .code(2);
}

#[test]
fn cli_missing_explicit_config() {
    let temp = setup_project();
    sndoc(&temp)
        .args(["--config", "absent.yaml", "validate", "-t", "incident_management", "-d", "valid.yaml"])
        .assert()
        .code(2);
}

#[test]
fn cli_lists_types() {
    let temp = setup_project();
    sndoc(&temp)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("incident_management"))
        .stdout(predicate::str::contains("インシデント管理設計書"))
        .stdout(predicate::str::contains("Knowledge Management"))
        .stdout(predicate::str::contains("42 document types"));
}

#[test]
fn cli_lists_types_as_json() {
    let temp = setup_project();
    let output = sndoc(&temp).args(["types", "--json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 42);
    assert!(entries
        .iter()
        .any(|e| e["key"] == "slm_design" && e["validator"] == "SLM Design"));
}
