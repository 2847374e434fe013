use regex::Regex;

use super::TestItem;
use crate::tree::FileNode;

/// Ecosystems with test-file conventions the discovery engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ecosystem {
    JavaScript,
    Python,
    Go,
    Rust,
}

const JS_TEST_SUFFIXES: &[&str] = &[
    ".test.js", ".test.jsx", ".test.ts", ".test.tsx", ".spec.js", ".spec.jsx", ".spec.ts",
    ".spec.tsx",
];

/// Classify a file as a test file by naming convention; Rust is the one
/// ecosystem recognized by an inline attribute token instead of the name.
fn classify(name: &str, content: &str) -> Option<Ecosystem> {
    if JS_TEST_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return Some(Ecosystem::JavaScript);
    }
    if name.ends_with(".py") && (name.starts_with("test_") || name.ends_with("_test.py")) {
        return Some(Ecosystem::Python);
    }
    if name.ends_with("_test.go") {
        return Some(Ecosystem::Go);
    }
    if name.ends_with(".rs") && content.contains("#[test]") {
        return Some(Ecosystem::Rust);
    }
    None
}

/// Extracts suite/test structure from one classified file, in textual
/// appearance order.
trait SuiteExtractor {
    fn extract(&self, name: &str, path: &str, content: &str) -> Vec<TestItem>;
}

fn extractor_for(ecosystem: Ecosystem) -> Box<dyn SuiteExtractor> {
    match ecosystem {
        Ecosystem::JavaScript => Box::new(JsExtractor::new()),
        Ecosystem::Python => Box::new(PythonExtractor::new()),
        Ecosystem::Go => Box::new(GoExtractor::new()),
        Ecosystem::Rust => Box::new(RustExtractor::new()),
    }
}

/// Append a test to the most recent suite, opening a file-named suite first
/// when the file declares tests before (or without) any grouping construct.
fn push_test(suites: &mut Vec<TestItem>, test_name: &str, name: &str, path: &str) {
    if suites.is_empty() {
        suites.push(TestItem::suite(name, name, path));
    }
    let suite = suites.last_mut().expect("suite exists");
    let suite_name = suite.name.clone();
    suite
        .children
        .push(TestItem::test(test_name, name, path, &suite_name));
}

struct JsExtractor {
    describe: Regex,
    case: Regex,
}

impl JsExtractor {
    fn new() -> Self {
        Self {
            // The leading class keeps method calls like `re.test(...)` from
            // counting as test cases.
            describe: Regex::new(r#"(?:^|[^.\w])describe\s*\(\s*["'`]([^"'`]+)"#)
                .expect("Invalid regex"),
            case: Regex::new(r#"(?:^|[^.\w])(?:it|test)\s*\(\s*["'`]([^"'`]+)"#)
                .expect("Invalid regex"),
        }
    }
}

impl SuiteExtractor for JsExtractor {
    fn extract(&self, name: &str, path: &str, content: &str) -> Vec<TestItem> {
        let mut suites = Vec::new();
        for line in content.lines() {
            if let Some(caps) = self.describe.captures(line) {
                suites.push(TestItem::suite(&caps[1], name, path));
            } else if let Some(caps) = self.case.captures(line) {
                push_test(&mut suites, &caps[1], name, path);
            }
        }
        suites
    }
}

struct PythonExtractor {
    class: Regex,
    case: Regex,
}

impl PythonExtractor {
    fn new() -> Self {
        Self {
            class: Regex::new(r"^\s*class\s+(Test\w*)\b").expect("Invalid regex"),
            case: Regex::new(r"^\s*(?:async\s+)?def\s+(test_\w+)").expect("Invalid regex"),
        }
    }
}

impl SuiteExtractor for PythonExtractor {
    fn extract(&self, name: &str, path: &str, content: &str) -> Vec<TestItem> {
        let mut suites = Vec::new();
        for line in content.lines() {
            if let Some(caps) = self.class.captures(line) {
                suites.push(TestItem::suite(&caps[1], name, path));
            } else if let Some(caps) = self.case.captures(line) {
                push_test(&mut suites, &caps[1], name, path);
            }
        }
        suites
    }
}

struct GoExtractor {
    case: Regex,
}

impl GoExtractor {
    fn new() -> Self {
        Self {
            case: Regex::new(r"^func\s+(Test\w+)\s*\(").expect("Invalid regex"),
        }
    }
}

impl SuiteExtractor for GoExtractor {
    fn extract(&self, name: &str, path: &str, content: &str) -> Vec<TestItem> {
        let mut suites = Vec::new();
        for line in content.lines() {
            if let Some(caps) = self.case.captures(line) {
                push_test(&mut suites, &caps[1], name, path);
            }
        }
        suites
    }
}

struct RustExtractor {
    func: Regex,
}

/// How far below a `#[test]` attribute the function header may sit (other
/// attributes can be stacked in between).
const RUST_ATTR_LOOKAHEAD: usize = 5;

impl RustExtractor {
    fn new() -> Self {
        Self {
            func: Regex::new(r"(?:pub\s+)?(?:async\s+)?fn\s+([a-zA-Z_][a-zA-Z0-9_]*)")
                .expect("Invalid regex"),
        }
    }
}

impl SuiteExtractor for RustExtractor {
    fn extract(&self, name: &str, path: &str, content: &str) -> Vec<TestItem> {
        let lines: Vec<&str> = content.lines().collect();
        let mut suites = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("#[test]") {
                continue;
            }
            let end = (i + RUST_ATTR_LOOKAHEAD + 1).min(lines.len());
            if let Some(caps) = lines[i..end]
                .iter()
                .find_map(|l| self.func.captures(l))
            {
                push_test(&mut suites, &caps[1], name, path);
            }
        }
        suites
    }
}

/// Builds the hierarchical test tree for a project snapshot.
///
/// Deterministic: the same tree content always yields the same suites in the
/// same order (file traversal order, then textual appearance order).
pub struct TestDiscovery;

impl TestDiscovery {
    /// Discover all test suites in the tree. Zero test files is a normal,
    /// empty result.
    #[must_use]
    pub fn discover(root: &FileNode) -> Vec<TestItem> {
        let mut items = Vec::new();
        for entry in root.walk_files() {
            let Some(content) = entry.content else {
                continue;
            };
            let Some(ecosystem) = classify(entry.name, content) else {
                continue;
            };

            let suites = extractor_for(ecosystem).extract(entry.name, &entry.path, content);
            if suites.is_empty() {
                items.push(TestItem::file_leaf(entry.name, &entry.path));
            } else {
                items.extend(suites);
            }
        }
        items
    }
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
