use std::time::Duration;

use indexmap::IndexMap;
use rand::Rng;

use super::{TestItem, TestStatus};
use crate::error::{AuditGuardError, Result};
use crate::scan::{PolicyKind, SecurityIssue, SecurityPolicy};
use crate::tree::FileNode;

/// Injectable time source for simulated execution, so runner behavior can be
/// tested without real elapsed time.
pub trait Simulator {
    /// Simulated duration for the next test, in milliseconds.
    fn duration_ms(&mut self) -> u64;
    /// Artificial delay before a test's status settles.
    fn pause(&mut self, ms: u64);
}

/// Default simulator: pseudo-random durations and real sleeps.
pub struct LatencySimulator {
    min_ms: u64,
    max_ms: u64,
}

impl LatencySimulator {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(40, 120)
    }
}

impl Simulator for LatencySimulator {
    fn duration_ms(&mut self) -> u64 {
        rand::rng().random_range(self.min_ms..=self.max_ms)
    }

    fn pause(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Fixed-duration, no-sleep simulator for deterministic runs.
pub struct ManualSimulator {
    duration_ms: u64,
}

impl ManualSimulator {
    #[must_use]
    pub const fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }
}

impl Simulator for ManualSimulator {
    fn duration_ms(&mut self) -> u64 {
        self.duration_ms
    }

    fn pause(&mut self, _ms: u64) {}
}

/// Literal markers that force a simulated failure, per ecosystem.
const FAILURE_MARKERS: &[&str] = &[
    "expect(false).toBe(true)",
    "assert.fail(",
    "assert False",
    "pytest.fail(",
    "t.Fatal(",
    "t.FailNow()",
    "assert!(false",
    "panic!(\"fail",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Simulated test executor.
///
/// Outcomes are decided from the latest scan and policy state, in priority
/// order: scanner findings for the test's file, then the root-credential
/// governance check, then explicit failure markers. Tests run strictly
/// sequentially in tree order; the event callback fires on every status
/// transition so a consumer can render progress live.
pub struct TestRunner<'a, S: Simulator> {
    tree: &'a FileNode,
    issues: &'a [SecurityIssue],
    policies: &'a IndexMap<String, SecurityPolicy>,
    simulator: S,
}

impl<'a, S: Simulator> TestRunner<'a, S> {
    #[must_use]
    pub const fn new(
        tree: &'a FileNode,
        issues: &'a [SecurityIssue],
        policies: &'a IndexMap<String, SecurityPolicy>,
        simulator: S,
    ) -> Self {
        Self {
            tree,
            issues,
            policies,
            simulator,
        }
    }

    /// Reset every item to idle, then run all leaves in tree order.
    pub fn run_all(
        &mut self,
        items: &mut [TestItem],
        on_event: &mut dyn FnMut(&TestItem),
    ) -> RunSummary {
        for item in items.iter_mut() {
            item.reset_status();
        }

        let mut summary = RunSummary::default();
        for item in items.iter_mut() {
            self.run_node(item, &mut summary, on_event);
        }
        summary
    }

    /// Run one suite or test by id; other nodes keep their state untouched.
    ///
    /// # Errors
    /// Returns [`AuditGuardError::TestNotFound`] when no node has the id.
    pub fn run_by_id(
        &mut self,
        items: &mut [TestItem],
        id: &str,
        on_event: &mut dyn FnMut(&TestItem),
    ) -> Result<RunSummary> {
        for item in items.iter_mut() {
            if let Some(node) = item.find_mut(id) {
                node.reset_status();
                let mut summary = RunSummary::default();
                self.run_node(node, &mut summary, on_event);
                return Ok(summary);
            }
        }
        Err(AuditGuardError::TestNotFound(id.to_string()))
    }

    fn run_node(
        &mut self,
        item: &mut TestItem,
        summary: &mut RunSummary,
        on_event: &mut dyn FnMut(&TestItem),
    ) {
        if item.is_leaf() {
            self.run_leaf(item, summary, on_event);
            return;
        }
        for child in &mut item.children {
            self.run_node(child, summary, on_event);
        }
    }

    fn run_leaf(
        &mut self,
        item: &mut TestItem,
        summary: &mut RunSummary,
        on_event: &mut dyn FnMut(&TestItem),
    ) {
        item.status = TestStatus::Running;
        on_event(item);

        let duration_ms = self.simulator.duration_ms();
        self.simulator.pause(duration_ms);

        summary.total += 1;
        item.status = match self.failure_message(item) {
            Some(message) => {
                summary.failed += 1;
                TestStatus::Failed {
                    duration_ms,
                    message,
                }
            }
            None => {
                summary.passed += 1;
                TestStatus::Passed { duration_ms }
            }
        };
        on_event(item);
    }

    /// Failure conditions in priority order; `None` means the test passes.
    fn failure_message(&self, item: &TestItem) -> Option<String> {
        if let Some(issue) = self.issues.iter().find(|i| i.file == item.file) {
            return Some(issue.description.clone());
        }

        let content = self.tree.content_at(&item.path).unwrap_or("");

        let governed = self
            .policies
            .values()
            .any(|p| p.enabled && p.kind == PolicyKind::RootCredential);
        if governed && content.contains("root") {
            return Some(format!(
                "Root credentials referenced in {}: workloads must not run with root credentials",
                item.file
            ));
        }

        FAILURE_MARKERS
            .iter()
            .find(|m| content.contains(*m))
            .map(|m| format!("Explicit failure marker found: {m}"))
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
