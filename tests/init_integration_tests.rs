//! Integration tests for the `init` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn init_creates_default_config_file() {
    let fixture = TestFixture::new();

    audit_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let config_path = fixture.path().join(".audit-guard.toml");
    assert!(config_path.exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("fail_on"));
    assert!(content.contains("min_duration_ms"));
}

#[test]
fn init_fails_if_config_exists() {
    let fixture = TestFixture::new();
    fixture.create_file(".audit-guard.toml", "# existing config\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites_existing_config() {
    let fixture = TestFixture::new();
    fixture.create_file(".audit-guard.toml", "# old config\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content =
        std::fs::read_to_string(fixture.path().join(".audit-guard.toml")).unwrap();
    assert!(content.contains("[scan]"));
    assert!(!content.contains("# old config"));
}

#[test]
fn init_template_is_accepted_by_the_scanner() {
    let fixture = TestFixture::new();
    fixture.create_file("src/lib.rs", "pub fn ok() {}\n");

    audit_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .success();

    audit_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--quiet"])
        .assert()
        .success();
}
