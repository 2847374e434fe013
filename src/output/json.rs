use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::rules::Severity;
use crate::scan::{ComplianceSummary, ScanReport, SecurityIssue, SecurityPolicy};
use crate::testing::{RunSummary, TestItem};

use super::{PolicyFormatter, ScanFormatter, TestFormatter};

pub struct JsonFormatter;

#[derive(Serialize)]
struct ScanJson<'a> {
    summary: ScanSummaryJson,
    issues: &'a [SecurityIssue],
    log: &'a [String],
}

#[derive(Serialize)]
struct ScanSummaryJson {
    total: usize,
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

#[derive(Serialize)]
struct TestsJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RunSummaryJson>,
    tests: &'a [TestItem],
}

#[derive(Serialize)]
struct RunSummaryJson {
    total: usize,
    passed: usize,
    failed: usize,
}

#[derive(Serialize)]
struct PoliciesJson<'a> {
    compliance: &'a ComplianceSummary,
    policies: Vec<&'a SecurityPolicy>,
}

impl ScanFormatter for JsonFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let count_of = |severity: Severity| -> usize {
            report
                .issues
                .iter()
                .filter(|i| i.severity == severity)
                .count()
        };
        let output = ScanJson {
            summary: ScanSummaryJson {
                total: report.issues.len(),
                critical: count_of(Severity::Critical),
                high: count_of(Severity::High),
                medium: count_of(Severity::Medium),
                low: count_of(Severity::Low),
            },
            issues: &report.issues,
            log: &report.log,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl TestFormatter for JsonFormatter {
    fn format_tests(&self, items: &[TestItem], summary: Option<&RunSummary>) -> Result<String> {
        let output = TestsJson {
            summary: summary.map(|s| RunSummaryJson {
                total: s.total,
                passed: s.passed,
                failed: s.failed,
            }),
            tests: items,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl PolicyFormatter for JsonFormatter {
    fn format_policies(
        &self,
        policies: &IndexMap<String, SecurityPolicy>,
        compliance: &ComplianceSummary,
    ) -> Result<String> {
        let output = PoliciesJson {
            compliance,
            policies: policies.values().collect(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
