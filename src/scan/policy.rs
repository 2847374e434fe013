use indexmap::IndexMap;
use serde::Serialize;

use super::SecurityIssue;
use crate::rules::Severity;

/// What a policy governs beyond severity aggregation. The runner gives
/// root-credential policies special treatment during governance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    General,
    RootCredential,
}

/// A named, togglable category of security rule.
///
/// `violations` is always a derived quantity: it is recomputed from the
/// latest issue set by [`recount_violations`] and never mutated on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityPolicy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub enabled: bool,
    /// Issue severities this policy aggregates when counting violations.
    pub issue_severities: Vec<Severity>,
    pub kind: PolicyKind,
    pub violations: usize,
}

impl SecurityPolicy {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        severity: Severity,
        issue_severities: &[Severity],
        kind: PolicyKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            severity,
            enabled: true,
            issue_severities: issue_severities.to_vec(),
            kind,
            violations: 0,
        }
    }
}

/// The fixed policy registry, in display order.
#[must_use]
pub fn default_policies() -> IndexMap<String, SecurityPolicy> {
    let policies = [
        SecurityPolicy::new(
            "secrets-management",
            "Secrets management",
            "Credentials must not be committed to source files",
            Severity::Critical,
            &[Severity::Critical],
            PolicyKind::General,
        ),
        SecurityPolicy::new(
            "public-access",
            "No public storage exposure",
            "Storage resources must not be world-readable or world-writable",
            Severity::Critical,
            &[Severity::Critical],
            PolicyKind::General,
        ),
        SecurityPolicy::new(
            "network-hardening",
            "Network access hardening",
            "Administrative ports must not be reachable from arbitrary networks",
            Severity::Medium,
            &[Severity::Medium],
            PolicyKind::General,
        ),
        SecurityPolicy::new(
            "encryption-at-rest",
            "Encryption at rest",
            "Data stores must keep encryption enabled",
            Severity::High,
            &[Severity::High],
            PolicyKind::General,
        ),
        SecurityPolicy::new(
            "iam-root",
            "No root credentials",
            "Workloads must use scoped identities, never the root account",
            Severity::Critical,
            &[Severity::Critical],
            PolicyKind::RootCredential,
        ),
        SecurityPolicy::new(
            "code-injection",
            "Code injection defenses",
            "Dynamic execution and string-built SQL are forbidden",
            Severity::High,
            &[Severity::Critical, Severity::High],
            PolicyKind::General,
        ),
    ];

    policies.into_iter().map(|p| (p.id.clone(), p)).collect()
}

/// Disable the listed policies; unknown ids are ignored here (config
/// validation reports them before this point).
pub fn apply_disabled(policies: &mut IndexMap<String, SecurityPolicy>, disabled: &[String]) {
    for id in disabled {
        if let Some(policy) = policies.get_mut(id) {
            policy.enabled = false;
        }
    }
}

/// Recompute every policy's violation count from the latest issue set.
/// Disabled policies always count zero.
pub fn recount_violations(
    policies: &mut IndexMap<String, SecurityPolicy>,
    issues: &[SecurityIssue],
) {
    for policy in policies.values_mut() {
        policy.violations = if policy.enabled {
            issues
                .iter()
                .filter(|i| policy.issue_severities.contains(&i.severity))
                .count()
        } else {
            0
        };
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
