mod discover;
mod runner;

pub use discover::TestDiscovery;
pub use runner::{LatencySimulator, ManualSimulator, RunSummary, Simulator, TestRunner};

use serde::Serialize;

/// Execution state of one test item. `Idle` is the initial state; `Passed`
/// and `Failed` are terminal for a run. A new "run all" resets every node
/// back to `Idle` before transitioning again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TestStatus {
    Idle,
    Running,
    Passed {
        duration_ms: u64,
    },
    Failed {
        duration_ms: u64,
        message: String,
    },
}

impl TestStatus {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed { .. } | Self::Failed { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Suite,
    Test,
}

/// A node in the discovered test tree. Suites carry children; tests are
/// leaves. The whole tree is rebuilt from scratch on every discovery pass;
/// only `status` is mutated in place, by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestItem {
    /// Composite of file path and extracted name, unique within the tree.
    pub id: String,
    pub name: String,
    /// Bare file name; governance failures cross-reference scanner issues by
    /// this field.
    pub file: String,
    /// Slash-joined path of the file within the tree.
    pub path: String,
    pub kind: TestKind,
    pub status: TestStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestItem>,
}

impl TestItem {
    #[must_use]
    pub fn suite(name: &str, file: &str, path: &str) -> Self {
        Self {
            id: format!("{path}#{name}"),
            name: name.to_string(),
            file: file.to_string(),
            path: path.to_string(),
            kind: TestKind::Suite,
            status: TestStatus::Idle,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn test(name: &str, file: &str, path: &str, suite: &str) -> Self {
        Self {
            id: format!("{path}#{suite}#{name}"),
            name: name.to_string(),
            file: file.to_string(),
            path: path.to_string(),
            kind: TestKind::Test,
            status: TestStatus::Idle,
            children: Vec::new(),
        }
    }

    /// A classified test file with no extractable structure becomes a single
    /// leaf named after the file.
    #[must_use]
    pub fn file_leaf(file: &str, path: &str) -> Self {
        Self {
            id: format!("{path}#{file}"),
            name: file.to_string(),
            file: file.to_string(),
            path: path.to_string(),
            kind: TestKind::Test,
            status: TestStatus::Idle,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, TestKind::Test)
    }

    /// Number of leaf tests under this node (the node itself if a leaf).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Self::leaf_count).sum()
        }
    }

    pub fn reset_status(&mut self) {
        self.status = TestStatus::Idle;
        for child in &mut self.children {
            child.reset_status();
        }
    }

    #[must_use]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

/// Leaf tests across a forest, in tree order.
#[must_use]
pub fn total_leaves(items: &[TestItem]) -> usize {
    items.iter().map(TestItem::leaf_count).sum()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
