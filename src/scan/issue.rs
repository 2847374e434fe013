use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::rules::Severity;

/// One concrete rule match at a specific file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityIssue {
    /// Stable identifier: rule tag plus a digest of (file, line, tag), so
    /// re-scanning unchanged input yields identical ids.
    pub id: String,
    /// Bare file name; test failures cross-reference issues by this field.
    pub file: String,
    /// Slash-joined path from the tree root, for display.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// Deterministic issue id from file name, line number and rule tag.
#[must_use]
pub fn issue_id(file: &str, line: usize, tag: &str) -> String {
    let digest = Sha256::digest(format!("{file}:{line}:{tag}").as_bytes());
    let mut short = String::with_capacity(12);
    for byte in digest.iter().take(6) {
        short.push_str(&format!("{byte:02x}"));
    }
    format!("{tag}-{short}")
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
