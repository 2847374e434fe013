use super::*;

fn small_tree() -> Vec<TestItem> {
    let mut auth = TestItem::suite("Auth", "auth.test.ts", "src/auth.test.ts");
    auth.children
        .push(TestItem::test("logs in", "auth.test.ts", "src/auth.test.ts", "Auth"));
    auth.children
        .push(TestItem::test("logs out", "auth.test.ts", "src/auth.test.ts", "Auth"));
    vec![auth, TestItem::file_leaf("smoke_test.go", "smoke_test.go")]
}

#[test]
fn suite_and_test_ids_compose_path_and_names() {
    let items = small_tree();
    assert_eq!(items[0].id, "src/auth.test.ts#Auth");
    assert_eq!(items[0].children[0].id, "src/auth.test.ts#Auth#logs in");
    assert_eq!(items[1].id, "smoke_test.go#smoke_test.go");
}

#[test]
fn leaf_count_counts_only_tests() {
    let items = small_tree();
    assert_eq!(items[0].leaf_count(), 2);
    assert_eq!(items[1].leaf_count(), 1);
    assert_eq!(total_leaves(&items), 3);
}

#[test]
fn reset_status_recurses() {
    let mut items = small_tree();
    items[0].children[0].status = TestStatus::Passed { duration_ms: 10 };
    items[0].status = TestStatus::Running;
    items[0].reset_status();
    assert_eq!(items[0].status, TestStatus::Idle);
    assert_eq!(items[0].children[0].status, TestStatus::Idle);
}

#[test]
fn find_mut_locates_nested_nodes() {
    let mut items = small_tree();
    let node = items[0].find_mut("src/auth.test.ts#Auth#logs out");
    assert!(node.is_some());
    assert_eq!(node.unwrap().name, "logs out");
    assert!(items[0].find_mut("nope").is_none());
}

#[test]
fn terminal_states_are_passed_and_failed() {
    assert!(!TestStatus::Idle.is_terminal());
    assert!(!TestStatus::Running.is_terminal());
    assert!(TestStatus::Passed { duration_ms: 1 }.is_terminal());
    let failed = TestStatus::Failed {
        duration_ms: 1,
        message: "boom".to_string(),
    };
    assert!(failed.is_terminal());
    assert!(failed.is_failed());
}
