//! Contract test for the waterfall JSON document shape

use perfgen::services::generate;
use perfgen::services::waterfall::waterfall_config;
use serde_json::Value;

fn waterfall_document() -> Value {
    let rendered = generate::generate_waterfall_json(&waterfall_config()).unwrap();
    serde_json::from_str(&rendered).unwrap()
}

#[test]
fn test_top_level_keys() {
    let doc = waterfall_document();
    let map = doc.as_object().unwrap();

    // Autogenerated markers sort first so they sit at the top of the file
    let first_keys: Vec<&String> = map.keys().take(2).collect();
    assert_eq!(first_keys[0], "AAAAA1 AUTOGENERATED FILE DO NOT EDIT");
    assert_eq!(first_keys[1], "AAAAA2 Run perfgen to make changes");

    assert!(map.contains_key("Win 10 Perf"));
    assert!(map.contains_key("Android Nexus5X WebView Perf"));
    assert!(map.contains_key("linux-perf"));
    assert!(map.contains_key("Linux Builder"));
}

#[test]
fn test_tester_entries_shape() {
    let doc = waterfall_document();
    let scripts = doc["Win 10 Perf"]["isolated_scripts"].as_array().unwrap();
    assert!(!scripts.is_empty());

    // Entries are sorted by step name
    let names: Vec<&str> = scripts.iter().map(|s| s["name"].as_str().unwrap()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    for script in scripts {
        assert!(script["isolate_name"].is_string());
        let swarming = &script["swarming"];
        assert_eq!(swarming["can_use_on_swarming_builders"], true);
        assert_eq!(swarming["upload_test_results"], true);
        let dimensions = swarming["dimension_sets"].as_array().unwrap();
        assert!(!dimensions.is_empty());
        for dimension in dimensions {
            assert!(dimension["id"].is_string());
            assert!(dimension["os"].is_string());
            assert!(dimension["pool"].is_string());
        }
    }
}

#[test]
fn test_reference_entries_follow_their_benchmark() {
    let doc = waterfall_document();
    let scripts = doc["Mac 10.12 Perf"]["isolated_scripts"].as_array().unwrap();

    let speedometer = scripts
        .iter()
        .find(|s| s["name"] == "speedometer")
        .expect("speedometer missing");
    assert_eq!(speedometer["swarming"]["ignore_task_failure"], false);

    let reference = scripts
        .iter()
        .find(|s| s["name"] == "speedometer.reference")
        .expect("speedometer.reference missing");
    assert_eq!(reference["swarming"]["ignore_task_failure"], true);
    let args: Vec<&str> = reference["args"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap())
        .collect();
    assert!(args.contains(&"--max-failures=5"));
    assert!(args.contains(&"--output-trace-tag=_ref"));
}

#[test]
fn test_migrated_tester_entries_shape() {
    let doc = waterfall_document();
    let scripts = doc["linux-perf"]["isolated_scripts"].as_array().unwrap();
    for script in scripts {
        assert_eq!(
            script["trigger_script"]["script"],
            "//testing/trigger_scripts/perf_device_trigger.py"
        );
        assert_eq!(script["merge"]["script"], "//tools/perf/process_perf_results.py");
        assert!(script["swarming"]["shards"].as_u64().unwrap() >= 1);
    }
}

#[test]
fn test_builder_entries_have_no_scripts() {
    let doc = waterfall_document();
    let builder = doc["Linux Builder"].as_object().unwrap();
    assert!(!builder.contains_key("isolated_scripts"));
    assert_eq!(builder["additional_compile_targets"], serde_json::json!(["chromedriver"]));
}
