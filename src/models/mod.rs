//! Data models for waterfall configuration, generated test entries, and lint results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target platform of a tester or benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Linux,
    Mac,
    Win,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::Win => "win",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A builder on the waterfall. Builders only compile; the optional extra
/// targets are archived alongside the browser for bisect tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_compile_targets: Option<Vec<String>>,
}

/// A non-telemetry perf test pinned to one device of a swarming pool
#[derive(Debug, Clone)]
pub struct PerfTest {
    pub name: &'static str,
    pub device_id: String,
}

/// Like [`PerfTest`] but with explicit command-line args and isolate name,
/// so one isolate can back several differently-configured steps.
#[derive(Debug, Clone)]
pub struct PerfTestWithArgs {
    pub step_name: &'static str,
    pub device_id: String,
    pub args: &'static [&'static str],
    pub isolate_name: &'static str,
}

/// One swarming dimension pool: required machine attributes plus the
/// device ids available for scheduling.
#[derive(Debug, Clone)]
pub struct DimensionPool {
    pub os: &'static str,
    pub pool: &'static str,
    pub gpu: Option<&'static str>,
    pub device_ids: Vec<String>,
    pub perf_tests: Vec<PerfTest>,
    pub perf_tests_with_args: Vec<PerfTestWithArgs>,
}

/// A tester on the waterfall
#[derive(Debug, Clone)]
pub struct TesterConfig {
    pub platform: Platform,
    pub target_bits: u32,
    pub num_host_shards: u32,
    pub num_device_shards: u32,
    pub replace_system_webview: bool,
    pub swarming_dimensions: Vec<DimensionPool>,
}

/// The whole waterfall: builder and tester configurations by name
#[derive(Debug, Clone, Default)]
pub struct Waterfall {
    pub builders: BTreeMap<String, BuilderConfig>,
    pub testers: BTreeMap<String, TesterConfig>,
}

/// A telemetry benchmark known to the generator. An empty platform list
/// means the benchmark runs everywhere.
#[derive(Debug, Clone)]
pub struct BenchmarkSpec {
    pub name: &'static str,
    pub emails: Option<&'static str>,
    pub component: Option<&'static str>,
    pub platforms: &'static [Platform],
    pub runs_on_svelte: bool,
}

/// Ownership metadata for one benchmark, as exported to benchmark.csv.
/// `not_scheduled` marks benchmarks absent from every waterfall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkMetadata {
    pub emails: Option<String>,
    pub component: Option<String>,
    pub not_scheduled: bool,
}

/// Swarming task settings attached to a generated test entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmingSpec {
    pub can_use_on_swarming_builders: bool,
    pub dimension_sets: Vec<BTreeMap<String, String>>,
    pub expiration: u64,
    pub hard_timeout: u64,
    pub ignore_task_failure: bool,
    pub io_timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shards: Option<usize>,
    pub upload_test_results: bool,
}

/// Device trigger script attached to new-recipe test entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerScript {
    pub script: String,
    pub args: Vec<String>,
}

/// Results merge script attached to new-recipe test entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeScript {
    pub script: String,
    pub args: Vec<String>,
}

/// One isolated-script test as it appears in the generated JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntry {
    pub args: Vec<String>,
    pub isolate_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_compile_targets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swarming: Option<SwarmingSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_script: Option<TriggerScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeScript>,
}

/// One isolate entry of a new-recipe tester. New-recipe testers get one
/// generated entry per isolate rather than one per benchmark.
#[derive(Debug, Clone)]
pub struct RecipeTest {
    pub isolate: &'static str,
    /// Step name when it differs from the isolate name
    pub test_suite: Option<&'static str>,
    pub extra_args: &'static [&'static str],
    /// Shard indices to trigger on; empty means all shards
    pub shards: &'static [usize],
    pub telemetry: bool,
}

/// A tester driven by the new perf recipe
#[derive(Debug, Clone)]
pub struct RecipeTester {
    pub tests: Vec<RecipeTest>,
    pub platform: Platform,
    pub dimension: BTreeMap<String, String>,
    pub device_ids: Vec<String>,
    /// Trybot-style testing config: run against the reference browser
    /// with a reduced benchmark set.
    pub testing: bool,
    pub replace_system_webview: bool,
}

/// A style error reported by a lint checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleError {
    pub line_number: u32,
    pub category: String,
    pub confidence: u32,
    pub message: String,
}
