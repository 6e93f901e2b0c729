//! Telemetry benchmark registry and scheduling tables
//!
//! The registry is the static equivalent of the benchmark discovery step:
//! every telemetry benchmark the waterfall can schedule is listed here with
//! its owners, component, and the platforms it runs on.

use crate::models::{BenchmarkSpec, Platform};
use crate::{Error, Result};

const ALL_PLATFORMS: &[Platform] = &[];
const ANDROID_ONLY: &[Platform] = &[Platform::Android];
const DESKTOP_ONLY: &[Platform] = &[Platform::Linux, Platform::Mac, Platform::Win];

/// Benchmarks that exist but are not yet scheduled on any waterfall
pub const UNSCHEDULED_TELEMETRY_BENCHMARKS: &[&str] = &["experimental.startup.android.coldish"];

/// Benchmarks whose results are uploaded in histogram format instead of
/// chartjson.
pub const BENCHMARKS_TO_OUTPUT_HISTOGRAMS: &[&str] = &[
    "dummy_benchmark.noisy_benchmark_1",
    "dummy_benchmark.stable_benchmark_1",
    "blink_perf.bindings",
    "blink_perf.canvas",
    "blink_perf.css",
    "blink_perf.dom",
    "blink_perf.events",
    "blink_perf.image_decoder",
    "blink_perf.layout",
    "blink_perf.owp_storage",
    "blink_perf.paint",
    "blink_perf.parser",
    "blink_perf.shadow_dom",
    "blink_perf.svg",
    "memory.top_10_mobile",
];

/// Overrides for the default 3 hour swarming hard timeout, in seconds
pub const BENCHMARK_SWARMING_TIMEOUTS: &[(&str, u64)] = &[
    ("loading.desktop", 14400),             // 4 hours (crbug.com/753798)
    ("loading.mobile", 16200),              // 4.5 hours
    ("system_health.memory_mobile", 14400), // 4 hours (crbug.com/775242)
    ("system_health.memory_desktop", 10800), // 3 hours
];

/// Overrides for the default 20 minute swarming I/O timeout, in seconds
pub const BENCHMARK_SWARMING_IO_TIMEOUTS: &[(&str, u64)] = &[
    ("jetstream", 1200), // 20 minutes
];

/// Benchmarks that are never run against reference builds
pub const BENCHMARK_REF_BUILD_BLACKLIST: &[&str] = &[
    "loading.desktop",          // Long running benchmark.
    "loading.mobile",           // Long running benchmark.
    "power.idle_platform",      // No browser used in benchmark.
    "v8.runtime_stats.top_25",  // Long running benchmark.
];

const TELEMETRY_BENCHMARKS: &[BenchmarkSpec] = &[
    BenchmarkSpec {
        name: "blink_perf.bindings",
        emails: Some("yukishiino@chromium.org"),
        component: Some("Blink>Bindings"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.canvas",
        emails: Some("fserb@chromium.org"),
        component: Some("Blink>Canvas"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.css",
        emails: Some("futhark@chromium.org"),
        component: Some("Blink>CSS"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.dom",
        emails: Some("hayato@chromium.org"),
        component: Some("Blink>DOM"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.events",
        emails: Some("hayato@chromium.org"),
        component: Some("Blink>DOM>Events"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.image_decoder",
        emails: Some("cblume@chromium.org"),
        component: Some("Blink>Image"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.layout",
        emails: Some("eae@chromium.org"),
        component: Some("Blink>Layout"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.owp_storage",
        emails: Some("dmurph@chromium.org"),
        component: Some("Blink>Storage"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.paint",
        emails: Some("wangxianzhu@chromium.org"),
        component: Some("Blink>Paint"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.parser",
        emails: Some("csharrison@chromium.org"),
        component: Some("Blink>HTML>Parser"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.shadow_dom",
        emails: Some("hayato@chromium.org"),
        component: Some("Blink>DOM>ShadowDOM"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "blink_perf.svg",
        emails: Some("fs@opera.com"),
        component: Some("Blink>SVG"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "dummy_benchmark.noisy_benchmark_1",
        emails: Some("nednguyen@google.com"),
        component: Some("Speed>Benchmarks>Waterfall"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "dummy_benchmark.stable_benchmark_1",
        emails: Some("nednguyen@google.com"),
        component: Some("Speed>Benchmarks>Waterfall"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "experimental.startup.android.coldish",
        emails: Some("pasko@chromium.org"),
        component: Some("Speed>Metrics>PageLoad"),
        platforms: ANDROID_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "jetstream",
        emails: Some("hablich@chromium.org"),
        component: Some("Blink>JavaScript"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "loading.desktop",
        emails: Some("kouhei@chromium.org"),
        component: Some("Speed>Metrics>PageLoad"),
        platforms: DESKTOP_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "loading.mobile",
        emails: Some("kouhei@chromium.org"),
        component: Some("Speed>Metrics>PageLoad"),
        platforms: ANDROID_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "memory.top_10_mobile",
        emails: Some("perezju@chromium.org"),
        component: Some("Speed>Memory"),
        platforms: ANDROID_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "power.idle_platform",
        emails: Some("charliea@chromium.org"),
        component: Some("Speed>Power"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "speedometer",
        emails: Some("hablich@chromium.org"),
        component: Some("Blink>JavaScript"),
        platforms: ALL_PLATFORMS,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "system_health.memory_desktop",
        emails: Some("perezju@chromium.org"),
        component: Some("Speed>Memory"),
        platforms: DESKTOP_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "system_health.memory_mobile",
        emails: Some("perezju@chromium.org"),
        component: Some("Speed>Memory"),
        platforms: ANDROID_ONLY,
        runs_on_svelte: true,
    },
    BenchmarkSpec {
        name: "v8.runtime_stats.top_25",
        emails: Some("cbruni@chromium.org"),
        component: Some("Blink>JavaScript"),
        platforms: ALL_PLATFORMS,
        // Memory-hungry instrumentation; keep it off low-memory devices.
        runs_on_svelte: false,
    },
];

/// Stable device-slot assignment for each telemetry benchmark. The slot is
/// taken modulo the tester's pool size to pick the triggering device, so
/// the same table serves every tester.
const BENCHMARK_DEVICE_AFFINITY: &[(&str, usize)] = &[
    ("blink_perf.bindings", 0),
    ("blink_perf.canvas", 1),
    ("blink_perf.css", 2),
    ("blink_perf.dom", 3),
    ("blink_perf.events", 4),
    ("blink_perf.image_decoder", 5),
    ("blink_perf.layout", 6),
    ("blink_perf.owp_storage", 7),
    ("blink_perf.paint", 8),
    ("blink_perf.parser", 9),
    ("blink_perf.shadow_dom", 10),
    ("blink_perf.svg", 11),
    ("dummy_benchmark.noisy_benchmark_1", 12),
    ("dummy_benchmark.stable_benchmark_1", 13),
    ("jetstream", 14),
    ("loading.desktop", 15),
    ("loading.mobile", 16),
    ("memory.top_10_mobile", 17),
    ("power.idle_platform", 18),
    ("speedometer", 19),
    ("system_health.memory_desktop", 20),
    ("system_health.memory_mobile", 21),
    ("v8.runtime_stats.top_25", 22),
];

/// All schedulable telemetry benchmarks, sorted by name
#[must_use]
pub fn current_benchmarks() -> Vec<&'static BenchmarkSpec> {
    let mut benchmarks: Vec<&BenchmarkSpec> = TELEMETRY_BENCHMARKS
        .iter()
        .filter(|b| !UNSCHEDULED_TELEMETRY_BENCHMARKS.contains(&b.name))
        .collect();
    benchmarks.sort_by_key(|b| b.name);
    benchmarks
}

/// Look up the full registry including unscheduled benchmarks
#[must_use]
pub fn all_telemetry_benchmarks() -> &'static [BenchmarkSpec] {
    TELEMETRY_BENCHMARKS
}

/// Pick the triggering device for a benchmark out of a tester's pool
pub fn sharded_device(benchmark_name: &str, device_ids: &[String]) -> Result<String> {
    let slot = BENCHMARK_DEVICE_AFFINITY
        .iter()
        .find(|(name, _)| *name == benchmark_name)
        .map(|(_, slot)| *slot)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "No sharding map entry for benchmark '{benchmark_name}' found. Please add \
                 the benchmark to UNSCHEDULED_TELEMETRY_BENCHMARKS, then file a bug with the \
                 Speed>Benchmarks>Waterfall component to schedule the benchmark on the perf \
                 waterfall."
            ))
        })?;
    if device_ids.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Empty device pool while sharding benchmark '{benchmark_name}'"
        )));
    }
    Ok(device_ids[slot % device_ids.len()].clone())
}

/// Hard timeout for a benchmark's swarming task, if overridden
#[must_use]
pub fn swarming_timeout(benchmark_name: &str) -> Option<u64> {
    BENCHMARK_SWARMING_TIMEOUTS
        .iter()
        .find(|(name, _)| *name == benchmark_name)
        .map(|(_, secs)| *secs)
}

/// I/O timeout for a benchmark's swarming task, if overridden
#[must_use]
pub fn swarming_io_timeout(benchmark_name: &str) -> Option<u64> {
    BENCHMARK_SWARMING_IO_TIMEOUTS
        .iter()
        .find(|(name, _)| *name == benchmark_name)
        .map(|(_, secs)| *secs)
}

/// Whether a benchmark is scheduled on a tester's platform and device
#[must_use]
pub fn is_scheduled(spec: &BenchmarkSpec, platform: Platform, device_type: Option<&str>) -> bool {
    if !spec.platforms.is_empty() && !spec.platforms.contains(&platform) {
        return false;
    }
    if !spec.runs_on_svelte {
        if let Some(device) = device_type {
            if crate::services::waterfall::SVELTE_DEVICES.contains(&device) {
                return false;
            }
        }
    }
    true
}
