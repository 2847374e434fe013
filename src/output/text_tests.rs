use super::*;
use crate::scan::{PolicyScanner, default_policies, recount_violations};
use crate::testing::{ManualSimulator, TestDiscovery, TestRunner};
use crate::tree::FileNode;

fn formatter() -> TextFormatter {
    TextFormatter::new(ColorMode::Never)
}

#[test]
fn clean_scan_renders_friendly_empty_state() {
    let report = PolicyScanner::default().scan(&FileNode::folder("p", vec![]));
    let text = formatter().format_scan(&report).unwrap();
    assert_eq!(text, "No issues found.\n");
}

#[test]
fn scan_output_lists_findings_and_summary() {
    let tree = FileNode::folder(
        "p",
        vec![FileNode::file("infra.tf", "acl = \"public-read\"\n")],
    );
    let report = PolicyScanner::default().scan(&tree);
    let text = formatter().format_scan(&report).unwrap();
    assert!(text.contains("CRITICAL infra.tf:1"));
    assert!(text.contains("Storage bucket exposed"));
    assert!(text.contains("Summary: 1 issue(s) found: 1 critical, 0 high, 0 medium, 0 low"));
}

#[test]
fn verbose_scan_output_includes_recommendations() {
    let tree = FileNode::folder(
        "p",
        vec![FileNode::file("infra.tf", "acl = \"public-read\"\n")],
    );
    let report = PolicyScanner::default().scan(&tree);
    let text = TextFormatter::with_verbose(ColorMode::Never, 1)
        .format_scan(&report)
        .unwrap();
    assert!(text.contains("Fix: "));
}

#[test]
fn empty_test_tree_renders_no_tests_found() {
    let text = formatter().format_tests(&[], None).unwrap();
    assert_eq!(text, "No tests found.\n");
}

#[test]
fn test_listing_indents_children_under_suites() {
    let tree = FileNode::file(
        "app.test.ts",
        "describe('Auth', () => {\n  it('logs in', () => {});\n});\n",
    );
    let items = TestDiscovery::discover(&tree);
    let text = formatter().format_tests(&items, None).unwrap();
    assert!(text.contains("Auth (app.test.ts)"));
    assert!(text.contains("  · logs in"));
}

#[test]
fn run_report_shows_status_durations_and_summary() {
    let tree = FileNode::file(
        "app.test.ts",
        "describe('Auth', () => {\n  it('logs in', () => {});\n});\n",
    );
    let issues = Vec::new();
    let policies = default_policies();
    let mut items = TestDiscovery::discover(&tree);
    let mut runner = TestRunner::new(&tree, &issues, &policies, ManualSimulator::new(9));
    let summary = runner.run_all(&mut items, &mut |_| {});

    let text = formatter().format_tests(&items, Some(&summary)).unwrap();
    assert!(text.contains("✓ logs in (9 ms)"));
    assert!(text.contains("Summary: 1 test(s) run, 1 passed, 0 failed"));
}

#[test]
fn failed_tests_show_their_message() {
    let tree = FileNode::file(
        "sad.test.ts",
        "it('sad', () => {\n  expect(false).toBe(true);\n});\n",
    );
    let issues = Vec::new();
    let policies = default_policies();
    let mut items = TestDiscovery::discover(&tree);
    let mut runner = TestRunner::new(&tree, &issues, &policies, ManualSimulator::new(3));
    let summary = runner.run_all(&mut items, &mut |_| {});

    let text = formatter().format_tests(&items, Some(&summary)).unwrap();
    assert!(text.contains("✗ sad (3 ms)"));
    assert!(text.contains("Explicit failure marker found"));
}

#[test]
fn policy_table_shows_toggles_and_counts() {
    let tree = FileNode::folder(
        "p",
        vec![FileNode::file("config.py", "password = \"abc123\"\n")],
    );
    let report = PolicyScanner::default().scan(&tree);
    let mut policies = default_policies();
    recount_violations(&mut policies, &report.issues);
    let compliance = crate::scan::ComplianceSummary::derive(&policies, &report.issues);

    let text = formatter().format_policies(&policies, &compliance).unwrap();
    assert!(text.contains("[on]  CRITICAL Secrets management (secrets-management): 1 violation(s)"));
    assert!(text.contains("Compliance: FAIL"));
}

#[test]
fn passing_compliance_renders_pass() {
    let policies = default_policies();
    let compliance = crate::scan::ComplianceSummary::derive(&policies, &[]);
    let text = formatter().format_policies(&policies, &compliance).unwrap();
    assert!(text.contains("Compliance: PASS"));
}
