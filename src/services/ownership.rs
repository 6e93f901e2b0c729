//! Benchmark ownership metadata and validation
//!
//! Every benchmark that shows up on a waterfall must map to an owner so
//! regressions have somewhere to go. The tables here cover the tests that
//! are not telemetry benchmarks; telemetry owners come from the registry.

use crate::models::BenchmarkMetadata;
use crate::services::{benchmarks, waterfall};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Ownership rows for isolates that are not telemetry benchmarks.
/// `not_scheduled` marks tests absent from every waterfall.
pub const NON_TELEMETRY_BENCHMARKS: &[(&str, &str, Option<&str>, bool)] = &[
    (
        "angle_perftests",
        "jmadill@chromium.org, chrome-gpu-perf-owners@chromium.org",
        Some("Internals>GPU>ANGLE"),
        false,
    ),
    (
        "validating_command_buffer_perftests",
        "piman@chromium.org, chrome-gpu-perf-owners@chromium.org",
        Some("Internals>GPU"),
        false,
    ),
    (
        "passthrough_command_buffer_perftests",
        "piman@chromium.org, chrome-gpu-perf-owners@chromium.org",
        Some("Internals>GPU>ANGLE"),
        false,
    ),
    ("net_perftests", "xunjieli@chromium.org", None, false),
    (
        "gpu_perftests",
        "reveman@chromium.org, chrome-gpu-perf-owners@chromium.org",
        Some("Internals>GPU"),
        false,
    ),
    (
        "tracing_perftests",
        "kkraynov@chromium.org, primiano@chromium.org",
        None,
        false,
    ),
    (
        "load_library_perf_tests",
        "xhwang@chromium.org, crouleau@chromium.org",
        Some("Internals>Media>Encrypted"),
        false,
    ),
    ("media_perftests", "crouleau@chromium.org", None, false),
    ("performance_browser_tests", "miu@chromium.org", None, false),
    (
        "views_perftests",
        "tapted@chromium.org",
        Some("Internals>Views"),
        false,
    ),
    ("components_perftests", "csharrison@chromium.org", None, false),
];

/// Ownership rows for benchmarks that run outside any waterfall
pub const NON_WATERFALL_BENCHMARKS: &[(&str, &str, Option<&str>, bool)] = &[
    ("sizes (mac)", "tapted@chromium.org", None, false),
    ("sizes (win)", "grt@chromium.org", None, false),
    ("sizes (linux)", "thestig@chromium.org", None, false),
    (
        "resource_sizes",
        "agrieve@chromium.org, rnephew@chromium.org, perezju@chromium.org",
        None,
        false,
    ),
    ("supersize_archive", "agrieve@chromium.org", None, false),
];

fn insert_static_rows(
    metadata: &mut BTreeMap<String, BenchmarkMetadata>,
    rows: &[(&str, &str, Option<&str>, bool)],
) {
    for (name, emails, component, not_scheduled) in rows {
        metadata.insert(
            (*name).to_string(),
            BenchmarkMetadata {
                emails: Some((*emails).to_string()),
                component: component.map(str::to_string),
                not_scheduled: *not_scheduled,
            },
        );
    }
}

fn insert_telemetry_rows(metadata: &mut BTreeMap<String, BenchmarkMetadata>) {
    for benchmark in benchmarks::current_benchmarks() {
        metadata.insert(
            benchmark.name.to_string(),
            BenchmarkMetadata {
                emails: benchmark.emails.map(str::to_string),
                component: benchmark.component.map(str::to_string),
                not_scheduled: false,
            },
        );
    }
}

/// Ownership metadata for everything that can appear on a waterfall
#[must_use]
pub fn waterfall_benchmarks_metadata() -> BTreeMap<String, BenchmarkMetadata> {
    let mut metadata = BTreeMap::new();
    insert_static_rows(&mut metadata, NON_TELEMETRY_BENCHMARKS);
    insert_telemetry_rows(&mut metadata);
    metadata
}

/// Ownership metadata for benchmark.csv: waterfall plus non-waterfall rows
#[must_use]
pub fn all_benchmarks_metadata() -> BTreeMap<String, BenchmarkMetadata> {
    let mut metadata = BTreeMap::new();
    insert_static_rows(&mut metadata, NON_TELEMETRY_BENCHMARKS);
    insert_static_rows(&mut metadata, NON_WATERFALL_BENCHMARKS);
    insert_telemetry_rows(&mut metadata);
    metadata
}

fn collect_test_names(tests: &BTreeMap<String, Value>) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for (entry_name, entry) in tests {
        let scripts = entry
            .get("isolated_scripts")
            .or_else(|| entry.get("scripts"))
            .and_then(Value::as_array);
        let Some(scripts) = scripts else {
            if waterfall::is_builder(entry_name) || entry_name.starts_with("AAAAA") {
                continue;
            }
            return Err(Error::InvalidInput(format!(
                "Unknown test data '{entry_name}'"
            )));
        };
        for script in scripts {
            let Some(name) = script.get("name").and_then(Value::as_str) else {
                continue;
            };
            let name = name.strip_suffix(".reference").unwrap_or(name);
            // Ownership for new-recipe suites comes from the benchmark bot
            // map, not from the generated tests.
            if name == "performance_test_suite" {
                continue;
            }
            names.insert(name.to_string());
        }
    }
    Ok(names)
}

/// Check that the generated tests and the ownership tables agree exactly
pub fn verify_all_tests_in_benchmark_csv(
    tests: &BTreeMap<String, Value>,
    metadata: &BTreeMap<String, BenchmarkMetadata>,
) -> Result<()> {
    let mut test_names = collect_test_names(tests)?;

    // Disabled tests are filtered out of the waterfall json; count them
    // as present so they keep their ownership rows.
    for (name, data) in metadata {
        if data.not_scheduled {
            test_names.insert(name.clone());
        }
    }

    let benchmark_names: BTreeSet<String> = metadata.keys().cloned().collect();
    if benchmark_names != test_names {
        let mut messages = vec!["Please update NON_TELEMETRY_BENCHMARKS as below:".to_string()];
        for test in benchmark_names.difference(&test_names) {
            messages.push(format!("Remove {test} from NON_TELEMETRY_BENCHMARKS"));
        }
        for test in test_names.difference(&benchmark_names) {
            messages.push(format!("Add {test} to NON_TELEMETRY_BENCHMARKS"));
        }
        return Err(Error::Validation { messages });
    }

    verify_benchmark_owners(metadata)
}

/// Every benchmark must carry a non-empty owner list
pub fn verify_benchmark_owners(metadata: &BTreeMap<String, BenchmarkMetadata>) -> Result<()> {
    let unowned: Vec<&String> = metadata
        .iter()
        .filter(|(_, data)| data.emails.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect();

    if unowned.is_empty() {
        return Ok(());
    }
    let mut messages = vec![
        "All benchmarks must have owners. Please add owners for the following benchmarks:"
            .to_string(),
    ];
    messages.extend(unowned.into_iter().cloned());
    Err(Error::Validation { messages })
}

/// Quote a CSV field the way minimal-quoting writers do
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render benchmark.csv: name, owners, and component for every benchmark
pub fn benchmark_csv() -> Result<String> {
    let metadata = all_benchmarks_metadata();
    verify_benchmark_owners(&metadata)?;

    let mut lines = vec![
        csv_row(&["AUTOGENERATED FILE DO NOT EDIT"]),
        csv_row(&["Run perfgen to make changes"]),
        csv_row(&["Benchmark name", "Individual owners", "Component"]),
    ];

    // BTreeMap iteration gives rows sorted by benchmark name
    for (name, data) in &metadata {
        lines.push(csv_row(&[
            name,
            data.emails.as_deref().unwrap_or(""),
            data.component.as_deref().unwrap_or(""),
        ]));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    Ok(rendered)
}
