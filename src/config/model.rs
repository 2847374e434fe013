use serde::{Deserialize, Serialize};

use crate::error::{AuditGuardError, Result};
use crate::rules::Severity;
use crate::scan::default_policies;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub policies: PoliciesConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Settings for materializing and scanning a project tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Respect .gitignore rules during disk loads (default: true).
    #[serde(default = "default_true")]
    pub gitignore: bool,

    /// Glob patterns excluded from the tree.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to load; empty means every file. Extensionless names
    /// like "Dockerfile" are matched in full.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Minimum severity that turns the scan exit code into a failure.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            gitignore: true,
            exclude: Vec::new(),
            extensions: Vec::new(),
            fail_on: default_fail_on(),
        }
    }
}

/// Policy toggles; ids refer to the fixed policy registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoliciesConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Simulated-execution timing for the test runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerConfig {
    #[serde(default = "default_min_duration")]
    pub min_duration_ms: u64,

    #[serde(default = "default_max_duration")]
    pub max_duration_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration(),
            max_duration_ms: default_max_duration(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_fail_on() -> Severity {
    Severity::High
}

const fn default_min_duration() -> u64 {
    40
}

const fn default_max_duration() -> u64 {
    120
}

/// Validate semantic correctness beyond what deserialization enforces.
///
/// # Errors
/// Returns a `Config` error describing the first problem found.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.runner.min_duration_ms > config.runner.max_duration_ms {
        return Err(AuditGuardError::Config(format!(
            "runner duration range is inverted: min {} > max {}",
            config.runner.min_duration_ms, config.runner.max_duration_ms
        )));
    }

    for pattern in &config.scan.exclude {
        globset::Glob::new(pattern).map_err(|e| AuditGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }

    let known = default_policies();
    for id in &config.policies.disabled {
        if !known.contains_key(id) {
            return Err(AuditGuardError::Config(format!(
                "policies.disabled refers to unknown policy: {id}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
