//! Waterfall test-configuration generation
//!
//! Turns the literal tables in [`super::waterfall`] and
//! [`super::benchmarks`] into the JSON test maps consumed by the buildbot
//! tooling. Generation is a pure function of the tables, so regenerating
//! always produces byte-identical output.

use crate::models::{
    DimensionPool, Platform, RecipeTest, RecipeTester, SwarmingSpec, TestEntry, TesterConfig,
    TriggerScript, Waterfall,
};
use crate::services::{benchmarks, ownership, waterfall};
use crate::{Error, Result};
use serde_json::{Value, json};
use std::collections::BTreeMap;

const WEBVIEW_EMBEDDER_APK_ARG: &str =
    "--webview-embedder-apk=../../out/Release/apks/SystemWebViewShell.apk";

/// Everything the generator emits, rendered and ready to write
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub waterfall_json: String,
    pub fyi_json: String,
    pub benchmark_csv: String,
}

fn swarming_dimension(pool: &DimensionPool, device_id: &str) -> Result<BTreeMap<String, String>> {
    if !pool.device_ids.iter().any(|id| id == device_id) {
        return Err(Error::InvalidInput(format!(
            "Device '{device_id}' is not part of the swarming pool"
        )));
    }
    let mut dimension = BTreeMap::new();
    dimension.insert("id".to_string(), device_id.to_string());
    dimension.insert("os".to_string(), pool.os.to_string());
    dimension.insert("pool".to_string(), pool.pool.to_string());
    if let Some(gpu) = pool.gpu {
        dimension.insert("gpu".to_string(), gpu.to_string());
    }
    Ok(dimension)
}

#[allow(clippy::too_many_arguments)]
fn isolate_script_entry(
    swarming_dimensions: Vec<BTreeMap<String, String>>,
    args: Vec<String>,
    isolate_name: &str,
    step_name: &str,
    ignore_task_failure: bool,
    override_compile_targets: Option<Vec<String>>,
    swarming_timeout: Option<u64>,
    io_timeout: Option<u64>,
) -> TestEntry {
    let swarming = if swarming_dimensions.is_empty() {
        None
    } else {
        Some(SwarmingSpec {
            // Always say this is true regardless of whether the tester
            // supports swarming. It doesn't hurt.
            can_use_on_swarming_builders: true,
            dimension_sets: swarming_dimensions,
            expiration: 10 * 60 * 60,                        // 10 hours
            hard_timeout: swarming_timeout.unwrap_or(10800), // 3 hours
            ignore_task_failure,
            io_timeout: io_timeout.unwrap_or(1200), // 20 minutes
            shards: None,
            upload_test_results: true,
        })
    };
    TestEntry {
        args,
        isolate_name: isolate_name.to_string(),
        name: step_name.to_string(),
        override_compile_targets,
        swarming,
        trigger_script: None,
        merge: None,
    }
}

fn browser_for_tester(config: &TesterConfig) -> &'static str {
    match config.platform {
        Platform::Android => {
            if config.replace_system_webview {
                "android-webview"
            } else {
                "android-chromium"
            }
        }
        Platform::Win if config.target_bits == 64 => "release_x64",
        _ => "release",
    }
}

/// Build one telemetry benchmark entry. The step name keeps the benchmark
/// name so results land on the flakiness dashboard.
fn telemetry_test(
    swarming_dimensions: Vec<BTreeMap<String, String>>,
    benchmark_name: &str,
    browser: &str,
) -> TestEntry {
    let mut args = vec![
        benchmark_name.to_string(),
        "-v".to_string(),
        "--upload-results".to_string(),
        format!("--browser={browser}"),
    ];

    if benchmarks::BENCHMARKS_TO_OUTPUT_HISTOGRAMS.contains(&benchmark_name) {
        args.push("--output-format=histograms".to_string());
    } else {
        args.push("--output-format=chartjson".to_string());
    }

    let mut ignore_task_failure = false;
    let mut step_name = benchmark_name.to_string();
    if browser == "reference" {
        // If there are more than 5 failures, usually the whole ref build
        // benchmark will fail and the reference browser binary needs to be
        // updated. See crbug.com/707236.
        args.push("--max-failures=5".to_string());
        args.push("--output-trace-tag=_ref".to_string());
        step_name.push_str(".reference");
        // Failures on reference builds are not actionable until the
        // reference binary updates, so ignore them.
        ignore_task_failure = true;
    }

    let mut isolate_name = "telemetry_perf_tests";
    if browser == "android-webview" {
        args.push(WEBVIEW_EMBEDDER_APK_ARG.to_string());
        isolate_name = "telemetry_perf_webview_tests";
    }

    isolate_script_entry(
        swarming_dimensions,
        args,
        isolate_name,
        &step_name,
        ignore_task_failure,
        Some(vec![isolate_name.to_string()]),
        benchmarks::swarming_timeout(benchmark_name),
        benchmarks::swarming_io_timeout(benchmark_name),
    )
}

fn telemetry_tests(tester_name: &str, config: &TesterConfig) -> Result<Vec<TestEntry>> {
    let browser = browser_for_tester(config);
    let device_type = waterfall::android_device_type(tester_name);
    let mut entries = Vec::new();

    for benchmark in benchmarks::current_benchmarks() {
        if !benchmarks::is_scheduled(benchmark, config.platform, device_type) {
            continue;
        }

        // Each dimension pool triggers the benchmark on exactly one of its
        // devices, picked by the sharding table.
        let mut swarming_dimensions = Vec::new();
        for pool in &config.swarming_dimensions {
            let device = benchmarks::sharded_device(benchmark.name, &pool.device_ids)?;
            swarming_dimensions.push(swarming_dimension(pool, &device)?);
        }

        entries.push(telemetry_test(
            swarming_dimensions.clone(),
            benchmark.name,
            browser,
        ));

        // Schedule the same benchmark against the reference browser unless
        // blacklisted. Webview has no reference build right now.
        if !config.replace_system_webview
            && !benchmarks::BENCHMARK_REF_BUILD_BLACKLIST.contains(&benchmark.name)
        {
            entries.push(telemetry_test(
                swarming_dimensions,
                benchmark.name,
                "reference",
            ));
        }
    }

    Ok(entries)
}

fn cplusplus_tests(pool: &DimensionPool) -> Result<Vec<TestEntry>> {
    let mut entries = Vec::new();
    for test in &pool.perf_tests {
        entries.push(isolate_script_entry(
            vec![swarming_dimension(pool, &test.device_id)?],
            vec![],
            test.name,
            test.name,
            false,
            None,
            None,
            None,
        ));
    }
    for test in &pool.perf_tests_with_args {
        entries.push(isolate_script_entry(
            vec![swarming_dimension(pool, &test.device_id)?],
            test.args.iter().map(|a| (*a).to_string()).collect(),
            test.isolate_name,
            test.step_name,
            false,
            None,
            None,
            None,
        ));
    }
    Ok(entries)
}

/// Strip tests scheduled on blacklisted devices. Returns the surviving
/// tests plus a map of device id to the test names that were dropped.
#[must_use]
pub fn remove_blacklisted_device_tests(
    tests: Vec<TestEntry>,
    blacklisted_devices: &[&str],
) -> (Vec<TestEntry>, BTreeMap<String, Vec<String>>) {
    let mut kept = Vec::new();
    let mut skipped: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for mut test in tests {
        if let Some(swarming) = test.swarming.as_mut() {
            let mut dimensions = Vec::new();
            for dimension in swarming.dimension_sets.drain(..) {
                let blacklisted = dimension
                    .get("id")
                    .is_some_and(|id| blacklisted_devices.contains(&id.as_str()));
                if blacklisted {
                    skipped
                        .entry(dimension["id"].clone())
                        .or_default()
                        .push(test.name.clone());
                } else {
                    dimensions.push(dimension);
                }
            }
            if dimensions.is_empty() {
                continue;
            }
            swarming.dimension_sets = dimensions;
        }
        kept.push(test);
    }

    for names in skipped.values_mut() {
        names.sort_unstable();
    }
    (kept, skipped)
}

fn sorted_scripts(mut entries: Vec<TestEntry>) -> Result<Value> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(json!({ "isolated_scripts": serde_json::to_value(entries)? }))
}

/// Build the tests map for every builder and tester on the waterfall
pub fn generate_all_tests(waterfall: &Waterfall) -> Result<BTreeMap<String, Value>> {
    let mut tests = BTreeMap::new();

    for (name, config) in &waterfall.testers {
        // The generator only supports one dimension pool per tester; the
        // sharding table picks a single device out of it.
        if config.swarming_dimensions.len() != 1 {
            return Err(Error::InvalidInput(format!(
                "Tester '{name}' must have exactly one set of swarming dimensions"
            )));
        }

        let mut scripts = telemetry_tests(name, config)?;
        scripts.extend(cplusplus_tests(&config.swarming_dimensions[0])?);

        let (scripts, skipped) =
            remove_blacklisted_device_tests(scripts, waterfall::BLACKLISTED_DEVICES);
        for (device, skipped_tests) in &skipped {
            log::warn!(
                "Device '{device}' is blacklisted. These benchmarks are not scheduled: {}",
                skipped_tests.join(", ")
            );
        }

        tests.insert(name.clone(), sorted_scripts(scripts)?);
    }

    for (name, config) in &waterfall.builders {
        tests.insert(name.clone(), serde_json::to_value(config)?);
    }

    tests.insert("AAAAA1 AUTOGENERATED FILE DO NOT EDIT".to_string(), json!({}));
    tests.insert(
        "AAAAA2 Run perfgen to make changes".to_string(),
        json!({}),
    );
    Ok(tests)
}

fn telemetry_recipe_args(tester: &RecipeTester) -> Vec<String> {
    // Trybot-style testing configs always use the reference browser
    let browser = if tester.testing {
        "reference"
    } else {
        match tester.platform {
            Platform::Android => {
                if tester.replace_system_webview {
                    "android-webview"
                } else {
                    "android-chromium"
                }
            }
            _ => "release",
        }
    };

    let mut args = vec![
        "-v".to_string(),
        format!("--browser={browser}"),
        "--upload-results".to_string(),
    ];
    if browser == "android-webview" {
        args.push(WEBVIEW_EMBEDDER_APK_ARG.to_string());
    }
    if tester.testing {
        // Run a reduced benchmark set for quicker turnaround
        args.push("--testing=true".to_string());
    }
    args
}

fn non_telemetry_recipe_args() -> Vec<String> {
    // --non-telemetry tells the runner this test executes differently;
    // --migrated-test marks it as moved to the new recipe.
    vec![
        "--non-telemetry=true".to_string(),
        "--migrated-test=true".to_string(),
    ]
}

fn recipe_trigger_dimensions(tester: &RecipeTester, test: &RecipeTest) -> Vec<BTreeMap<String, String>> {
    let mut dimensions = Vec::new();
    for (index, device_id) in tester.device_ids.iter().enumerate() {
        // If specific shards are requested, only trigger on those
        if !test.shards.is_empty() && !test.shards.contains(&index) {
            continue;
        }
        let mut dimension = BTreeMap::new();
        dimension.insert("id".to_string(), device_id.clone());
        dimensions.push(dimension);
    }
    dimensions
}

/// Build one new-recipe test entry (one entry per isolate)
pub fn generate_performance_test(tester: &RecipeTester, test: &RecipeTest) -> Result<TestEntry> {
    let mut args = if test.telemetry {
        telemetry_recipe_args(tester)
    } else {
        non_telemetry_recipe_args()
    };
    args.extend(test.extra_args.iter().map(|a| (*a).to_string()));

    let dimensions = recipe_trigger_dimensions(tester, test);
    let trigger_script = TriggerScript {
        script: "//testing/trigger_scripts/perf_device_trigger.py".to_string(),
        args: vec![
            "--multiple-trigger-configs".to_string(),
            serde_json::to_string(&dimensions)?,
            "--multiple-dimension-script-verbose".to_string(),
            "True".to_string(),
        ],
    };
    let merge = crate::models::MergeScript {
        script: "//tools/perf/process_perf_results.py".to_string(),
        args: vec![
            "--service-account-file".to_string(),
            "/creds/service_accounts/service-account-chromium-perf-histograms.json".to_string(),
        ],
    };

    Ok(TestEntry {
        args,
        isolate_name: test.isolate.to_string(),
        name: test.test_suite.unwrap_or(test.isolate).to_string(),
        override_compile_targets: Some(vec![test.isolate.to_string()]),
        swarming: Some(SwarmingSpec {
            can_use_on_swarming_builders: true,
            dimension_sets: vec![tester.dimension.clone()],
            expiration: 10 * 60 * 60,   // 10 hours
            hard_timeout: 10 * 60 * 60, // 10 hours for the full suite
            ignore_task_failure: false,
            io_timeout: 30 * 60, // 30 minutes
            shards: Some(dimensions.len()),
            upload_test_results: true,
        }),
        trigger_script: Some(trigger_script),
        merge: Some(merge),
    })
}

/// Add or update new-recipe tester entries in a tests map
pub fn apply_recipe_testers(
    testers: &BTreeMap<String, RecipeTester>,
    tests: &mut BTreeMap<String, Value>,
) -> Result<()> {
    for (name, tester) in testers {
        let mut scripts = Vec::new();
        for test in &tester.tests {
            scripts.push(generate_performance_test(tester, test)?);
        }
        tests.insert(name.clone(), sorted_scripts(scripts)?);
    }
    Ok(())
}

fn render_json(tests: &BTreeMap<String, Value>) -> Result<String> {
    // serde_json object maps are BTreeMaps, so keys come out sorted at
    // every nesting level; that is what makes the validate diff stable.
    let mut rendered = serde_json::to_string_pretty(&serde_json::to_value(tests)?)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Render the main waterfall JSON, including migrated new-recipe testers
pub fn generate_waterfall_json(waterfall: &Waterfall) -> Result<String> {
    let mut tests = generate_all_tests(waterfall)?;
    apply_recipe_testers(&waterfall::migrated_testers(), &mut tests)?;
    render_json(&tests)
}

/// Update the FYI JSON: keep whatever testers are already listed and
/// overwrite or add the ones generated here.
pub fn update_fyi_json(existing: Option<&str>) -> Result<String> {
    let mut tests: BTreeMap<String, Value> = match existing {
        Some(text) => serde_json::from_str(text)
            .map_err(|e| Error::InvalidInput(format!("Malformed FYI JSON: {e}")))?,
        None => BTreeMap::new(),
    };
    apply_recipe_testers(&waterfall::fyi_testers(), &mut tests)?;
    render_json(&tests)
}

/// Generate all three artifacts and run the ownership validation
pub fn generate_artifacts(existing_fyi: Option<&str>) -> Result<Artifacts> {
    let waterfall = waterfall::waterfall_config();
    let mut tests = generate_all_tests(&waterfall)?;
    apply_recipe_testers(&waterfall::migrated_testers(), &mut tests)?;

    ownership::verify_all_tests_in_benchmark_csv(
        &tests,
        &ownership::waterfall_benchmarks_metadata(),
    )?;

    Ok(Artifacts {
        waterfall_json: render_json(&tests)?,
        fyi_json: update_fyi_json(existing_fyi)?,
        benchmark_csv: ownership::benchmark_csv()?,
    })
}
