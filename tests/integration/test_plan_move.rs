//! Integration tests for the rename planner walking a real tree

use crate::fixtures::create_source_tree_fixture;
use perfgen::services::rewrite::plan_move;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn plan_as_map(pairs: Vec<(String, String)>) -> BTreeMap<String, String> {
    pairs.into_iter().collect()
}

#[test]
fn test_plan_move_full_tree() {
    let temp_dir = TempDir::new().unwrap();
    create_source_tree_fixture(temp_dir.path()).unwrap();

    let pairs = plan_move(temp_dir.path(), &[]).unwrap();

    // Sorted by source path
    let sources: Vec<&str> = pairs.iter().map(|(src, _)| src.as_str()).collect();
    let mut sorted = sources.clone();
    sorted.sort_unstable();
    assert_eq!(sources, sorted);

    let plan = plan_as_map(pairs);
    assert_eq!(plan["Source/core/dom/Document.cpp"], "renderer/core/dom/document.cc");
    assert_eq!(plan["Source/core/dom/Document.h"], "renderer/core/dom/document.h");
    assert_eq!(plan["public/web/WebFrame.h"], "public/web/web_frame.h");
    assert_eq!(plan["public/web/WebKit.h"], "public/web/blink.h");
    assert_eq!(
        plan["common/feature_policy/feature_policy.cpp"],
        "common/feature_policy/feature_policy.cc"
    );
    assert_eq!(plan["public/BUILD.gn"], "public/BUILD.gn");

    // Inspector agents keep their names, node_modules is skipped entirely
    assert_eq!(
        plan["Source/core/inspector/InspectorDOMAgent.cpp"],
        "renderer/core/inspector/InspectorDOMAgent.cpp"
    );
    assert!(!plan.keys().any(|src| src.contains("node_modules")));
}

#[test]
fn test_plan_move_prefix_filter() {
    let temp_dir = TempDir::new().unwrap();
    create_source_tree_fixture(temp_dir.path()).unwrap();

    let pairs = plan_move(temp_dir.path(), &["public".to_string()]).unwrap();
    assert!(!pairs.is_empty());
    assert!(pairs.iter().all(|(src, _)| src.starts_with("public")));
}

#[test]
fn test_plan_move_empty_tree() {
    let temp_dir = TempDir::new().unwrap();
    let pairs = plan_move(temp_dir.path(), &[]).unwrap();
    assert!(pairs.is_empty());
}
