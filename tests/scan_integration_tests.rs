//! Integration tests for the `scan` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn scan_of_clean_project_succeeds_with_friendly_empty_state() {
    let fixture = TestFixture::new();
    fixture.create_file("src/lib.rs", "pub fn answer() -> u32 { 42 }\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."));
}

#[test]
fn scan_finds_public_acl_and_fails_with_exit_code_one() {
    let fixture = TestFixture::new();
    fixture.create_public_bucket("infra.tf");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CRITICAL infra.tf:2"))
        .stdout(predicate::str::contains("Storage bucket exposed"));
}

#[test]
fn fail_on_threshold_tolerates_lower_severities() {
    let fixture = TestFixture::new();
    // Medium finding only: open admin port.
    fixture.create_file(
        "sg.tf",
        "ingress { cidr_blocks = [\"0.0.0.0/0\"] }\ntags = { Team = \"net\" }\n",
    );

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--fail-on", "high"])
        .assert()
        .success();

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--fail-on", "medium"])
        .assert()
        .code(1);
}

#[test]
fn scan_json_output_is_parseable_and_stable() {
    let fixture = TestFixture::new();
    fixture.create_file("config.py", "password = \"abc123\"\n");

    let first = audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(value["summary"]["critical"], 1);
    assert_eq!(value["issues"][0]["file"], "config.py");
    assert_eq!(value["issues"][0]["line"], 1);

    let second = audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    assert_eq!(first, second);
}

#[test]
fn scan_log_prints_header_and_summary() {
    let fixture = TestFixture::new();
    fixture.create_file("src/lib.rs", "pub fn ok() {}\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanning project tree"))
        .stdout(predicate::str::contains("Scan complete: 0 issue(s) found"));
}

#[test]
fn scan_reads_a_json_snapshot() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "tree.json",
        r#"{
  "type": "folder",
  "name": "snapshot",
  "children": [
    { "type": "file", "name": "Dockerfile", "content": "FROM alpine\nUSER root\n" }
  ]
}"#,
    );

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--snapshot", "tree.json", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("HIGH Dockerfile:2"))
        .stdout(predicate::str::contains("root user"));
}

#[test]
fn scan_exclude_pattern_hides_findings() {
    let fixture = TestFixture::new();
    fixture.create_file("vendor/creds.py", "password = \"abc123\"\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "-x", "**/vendor/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."));
}

#[test]
fn scan_with_invalid_exclude_pattern_is_a_config_error() {
    let fixture = TestFixture::new();

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "-x", "[bad"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn scan_with_missing_snapshot_is_a_config_error() {
    let fixture = TestFixture::new();

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--snapshot", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn untagged_resource_is_a_low_finding() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "queue.tf",
        "resource \"aws_sqs_queue\" \"q\" {\n  name = \"jobs\"\n}\n",
    );

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--no-config", "--color", "never", "--fail-on", "low"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("LOW queue.tf:1"))
        .stdout(predicate::str::contains("without tags"));
}
