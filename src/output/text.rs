use std::fmt::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::rules::Severity;
use crate::scan::{ComplianceSummary, ScanReport, SecurityIssue, SecurityPolicy};
use crate::testing::{RunSummary, TestItem, TestStatus};

use super::{PolicyFormatter, ScanFormatter, TestFormatter};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical | Severity::High => ansi::RED,
            Severity::Medium => ansi::YELLOW,
            Severity::Low => ansi::CYAN,
        }
    }

    fn format_issue(&self, issue: &SecurityIssue, output: &mut String) {
        let label = self.paint(issue.severity.label(), Self::severity_color(issue.severity));
        let _ = writeln!(output, "✗ {label} {}:{}", issue.path, issue.line);
        let _ = writeln!(output, "   {}", issue.description);
        if self.verbose >= 1 {
            let _ = writeln!(output, "   Fix: {}", issue.recommendation);
        }
    }

    fn status_line(&self, item: &TestItem, indent: &str, output: &mut String) {
        let (icon, detail) = match &item.status {
            TestStatus::Idle => (self.paint("·", ansi::DIM), String::new()),
            TestStatus::Running => (self.paint("…", ansi::CYAN), String::new()),
            TestStatus::Passed { duration_ms } => {
                (self.paint("✓", ansi::GREEN), format!(" ({duration_ms} ms)"))
            }
            TestStatus::Failed { duration_ms, .. } => {
                (self.paint("✗", ansi::RED), format!(" ({duration_ms} ms)"))
            }
        };
        let _ = writeln!(output, "{indent}{icon} {}{detail}", item.name);
        if let TestStatus::Failed { message, .. } = &item.status {
            let _ = writeln!(output, "{indent}   {message}");
        }
    }

    fn format_item(&self, item: &TestItem, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);
        if item.is_leaf() {
            self.status_line(item, &indent, output);
            return;
        }
        let _ = writeln!(output, "{indent}{} ({})", item.name, item.file);
        for child in &item.children {
            self.format_item(child, depth + 1, output);
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ScanFormatter for TextFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        if report.is_clean() {
            output.push_str("No issues found.\n");
            return Ok(output);
        }

        for issue in &report.issues {
            self.format_issue(issue, &mut output);
            output.push('\n');
        }

        let count_of = |severity: Severity| -> usize {
            report
                .issues
                .iter()
                .filter(|i| i.severity == severity)
                .count()
        };
        let _ = writeln!(
            output,
            "Summary: {} issue(s) found: {} critical, {} high, {} medium, {} low",
            report.issues.len(),
            count_of(Severity::Critical),
            count_of(Severity::High),
            count_of(Severity::Medium),
            count_of(Severity::Low),
        );

        Ok(output)
    }
}

impl TestFormatter for TextFormatter {
    fn format_tests(&self, items: &[TestItem], summary: Option<&RunSummary>) -> Result<String> {
        let mut output = String::new();

        if items.is_empty() {
            output.push_str("No tests found.\n");
            return Ok(output);
        }

        for item in items {
            self.format_item(item, 0, &mut output);
        }

        if let Some(summary) = summary {
            let passed = self.paint(&summary.passed.to_string(), ansi::GREEN);
            let failed = self.paint(&summary.failed.to_string(), ansi::RED);
            let _ = writeln!(
                output,
                "\nSummary: {} test(s) run, {passed} passed, {failed} failed",
                summary.total
            );
        }

        Ok(output)
    }
}

impl PolicyFormatter for TextFormatter {
    fn format_policies(
        &self,
        policies: &IndexMap<String, SecurityPolicy>,
        compliance: &ComplianceSummary,
    ) -> Result<String> {
        let mut output = String::new();

        for policy in policies.values() {
            let toggle = if policy.enabled { "[on] " } else { "[off]" };
            let label = self.paint(
                policy.severity.label(),
                Self::severity_color(policy.severity),
            );
            let _ = writeln!(
                output,
                "{toggle} {label} {} ({}): {} violation(s)",
                policy.title, policy.id, policy.violations
            );
            if self.verbose >= 1 {
                let _ = writeln!(output, "      {}", policy.description);
            }
        }

        let verdict = if compliance.passed {
            self.paint("PASS", ansi::GREEN)
        } else {
            self.paint("FAIL", ansi::RED)
        };
        let _ = writeln!(
            output,
            "\nCompliance: {verdict} ({} issue(s): {} critical, {} high, {} medium, {} low)",
            compliance.total_issues,
            compliance.critical,
            compliance.high,
            compliance.medium,
            compliance.low,
        );

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
