use indexmap::IndexMap;
use serde::Serialize;

use super::{SecurityIssue, SecurityPolicy};
use crate::rules::Severity;

/// Aggregate compliance posture for one scan. Always derived fresh from the
/// policy registry and the latest issues so the summary can never drift from
/// the raw findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total_issues: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub enabled_policies: usize,
    pub violated_policies: usize,
    pub passed: bool,
}

impl ComplianceSummary {
    #[must_use]
    pub fn derive(
        policies: &IndexMap<String, SecurityPolicy>,
        issues: &[SecurityIssue],
    ) -> Self {
        let count_of = |severity: Severity| -> usize {
            issues.iter().filter(|i| i.severity == severity).count()
        };

        let enabled: Vec<&SecurityPolicy> =
            policies.values().filter(|p| p.enabled).collect();

        let violated_policies = enabled
            .iter()
            .filter(|policy| {
                issues
                    .iter()
                    .any(|i| policy.issue_severities.contains(&i.severity))
            })
            .count();

        // Pass only when no enabled policy aggregates a Critical or High hit.
        let passed = !enabled.iter().any(|policy| {
            issues.iter().any(|i| {
                i.severity.at_least(Severity::High)
                    && policy.issue_severities.contains(&i.severity)
            })
        });

        Self {
            total_issues: issues.len(),
            critical: count_of(Severity::Critical),
            high: count_of(Severity::High),
            medium: count_of(Severity::Medium),
            low: count_of(Severity::Low),
            enabled_policies: enabled.len(),
            violated_policies,
            passed,
        }
    }
}

#[cfg(test)]
#[path = "compliance_tests.rs"]
mod tests;
