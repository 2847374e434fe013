mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::RunProgress;
pub use text::{ColorMode, TextFormatter};

use indexmap::IndexMap;

use crate::error::Result;
use crate::scan::{ComplianceSummary, ScanReport, SecurityPolicy};
use crate::testing::{RunSummary, TestItem};

/// Formats a scan report for display.
pub trait ScanFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_scan(&self, report: &ScanReport) -> Result<String>;
}

/// Formats a discovered test tree, optionally with run results.
///
/// `summary: None` renders the tree as a listing (statuses untouched);
/// `Some` renders a run report.
pub trait TestFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_tests(&self, items: &[TestItem], summary: Option<&RunSummary>) -> Result<String>;
}

/// Formats the policy registry and compliance posture.
pub trait PolicyFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_policies(
        &self,
        policies: &IndexMap<String, SecurityPolicy>,
        compliance: &ComplianceSummary,
    ) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
