mod compliance;
mod issue;
mod policy;

pub use compliance::ComplianceSummary;
pub use issue::{SecurityIssue, issue_id};
pub use policy::{PolicyKind, SecurityPolicy, apply_disabled, default_policies, recount_violations};

use crate::rules::{FileClass, LineContext, RuleSet};
use crate::tree::FileNode;

/// Result of one scan invocation: the ordered findings plus a human-readable
/// log (one header line, one line per finding, one summary line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub issues: Vec<SecurityIssue>,
    pub log: Vec<String>,
}

impl ScanReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues at or above the given severity.
    #[must_use]
    pub fn count_at_least(&self, min: crate::rules::Severity) -> usize {
        self.issues.iter().filter(|i| i.severity.at_least(min)).count()
    }
}

/// Stateless pattern scanner over an in-memory file tree.
///
/// Every invocation produces a fresh report; the previous finding set is the
/// caller's to discard. The input tree is never mutated.
pub struct PolicyScanner {
    rules: RuleSet,
}

impl PolicyScanner {
    #[must_use]
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Scan the tree in depth-first pre-order, applying every rule to every
    /// line. Issues are appended in traversal order, then line order, then
    /// rule order; no re-sorting happens afterwards.
    #[must_use]
    pub fn scan(&self, root: &FileNode) -> ScanReport {
        let mut issues = Vec::new();
        let mut log = vec!["Scanning project tree for policy violations...".to_string()];

        for entry in root.walk_files() {
            let Some(content) = entry.content else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            let lines: Vec<&str> = content.lines().collect();
            let class = FileClass::of(entry.name);

            for index in 0..lines.len() {
                let ctx = LineContext {
                    file_name: entry.name,
                    class,
                    lines: &lines,
                    index,
                };
                for rule in self.rules.iter() {
                    if !rule.matches(&ctx) {
                        continue;
                    }
                    let line = index + 1;
                    log.push(format!(
                        "[{}] {}:{}: {}",
                        rule.severity, entry.path, line, rule.description
                    ));
                    issues.push(SecurityIssue {
                        id: issue_id(entry.name, line, rule.tag),
                        file: entry.name.to_string(),
                        path: entry.path.clone(),
                        line,
                        severity: rule.severity,
                        description: rule.description.to_string(),
                        recommendation: rule.recommendation.to_string(),
                    });
                }
            }
        }

        log.push(format!("Scan complete: {} issue(s) found", issues.len()));
        ScanReport { issues, log }
    }
}

impl Default for PolicyScanner {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
