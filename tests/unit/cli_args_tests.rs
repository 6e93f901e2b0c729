//! Unit tests for CLI argument parsing through the public API

use perfgen::cli::args::{
    parse_echo_server_args, parse_generate_args, parse_plan_move_args,
    parse_update_expectations_args,
};

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| (*a).to_string()).collect()
}

#[test]
fn test_generate_flag_order_does_not_matter() {
    let a = parse_generate_args(&strings(&["--validate-only", "--output-dir", "cfg"])).unwrap();
    let b = parse_generate_args(&strings(&["--output-dir", "cfg", "--validate-only"])).unwrap();
    assert_eq!(a.validate_only, b.validate_only);
    assert_eq!(a.output_dir, b.output_dir);
}

#[test]
fn test_generate_rejects_positional_arguments() {
    assert!(parse_generate_args(&strings(&["stray"])).is_err());
}

#[test]
fn test_plan_move_without_arguments() {
    let parsed = parse_plan_move_args(&[]).unwrap();
    assert!(parsed.root.is_none());
    assert!(parsed.prefixes.is_empty());
}

#[test]
fn test_echo_server_rejects_out_of_range_port() {
    assert!(parse_echo_server_args(&strings(&["--port", "70000"])).is_err());
    assert!(parse_echo_server_args(&strings(&["--port", "-1"])).is_err());
}

#[test]
fn test_update_expectations_multiple_builders() {
    let parsed = parse_update_expectations_args(&strings(&[
        "--expectations",
        "TestExpectations",
        "--bot-data",
        "bots.json",
        "Linux Tests",
        "Win Tests",
    ]))
    .unwrap();
    assert_eq!(parsed.builders, vec!["Linux Tests", "Win Tests"]);
}

#[test]
fn test_update_expectations_missing_builder_list() {
    let result = parse_update_expectations_args(&strings(&[
        "--expectations",
        "TestExpectations",
        "--bot-data",
        "bots.json",
    ]));
    assert!(result.is_err());
}
