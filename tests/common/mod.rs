#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the audit-guard binary.
#[macro_export]
macro_rules! audit_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("audit-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a basic audit-guard config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".audit-guard.toml", content);
    }

    /// Terraform file with a public ACL (one CRITICAL finding).
    pub fn create_public_bucket(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            "resource \"aws_s3_bucket\" \"assets\" {\n  acl = \"public-read\"\n  tags = {\n    Team = \"web\"\n  }\n}\n",
        );
    }

    /// Jest-style test file with one suite and two passing tests.
    pub fn create_passing_test_file(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            "describe('Calc', () => {\n  it('adds', () => {});\n  it('subtracts', () => {});\n});\n",
        );
    }

    /// Jest-style test file carrying an explicit failure marker.
    pub fn create_failing_test_file(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            "describe('Sad', () => {\n  it('never happy', () => {\n    expect(false).toBe(true);\n  });\n});\n",
        );
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Config that keeps simulated runs fast and gitignore handling off.
pub const FAST_CONFIG: &str = r#"
[scan]
gitignore = false

[runner]
min_duration_ms = 1
max_duration_ms = 2
"#;

/// Fast config with the root-credential policy disabled.
pub const FAST_CONFIG_NO_IAM_ROOT: &str = r#"
[scan]
gitignore = false

[policies]
disabled = ["iam-root"]

[runner]
min_duration_ms = 1
max_duration_ms = 2
"#;
