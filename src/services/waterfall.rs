//! Literal waterfall configuration tables
//!
//! These tables mirror the tester configurations used by the perf recipe
//! and must be kept in sync with it to generate correct JSON for each
//! tester.

use crate::models::{
    BuilderConfig, DimensionPool, PerfTest, PerfTestWithArgs, Platform, RecipeTest, RecipeTester,
    TesterConfig, Waterfall,
};
use std::collections::BTreeMap;

/// Android testers mapped to the device model they run on
pub const ANDROID_BOT_TO_DEVICE_TYPE: &[(&str, &str)] = &[
    ("Android Swarming N5X Tester", "Nexus 5X"),
    ("Android Nexus5X Perf", "Nexus 5X"),
    ("Android Nexus5 Perf", "Nexus 5"),
    ("Android Nexus6 Perf", "Nexus 6"),
    ("Android Nexus7v2 Perf", "Nexus 7"),
    ("Android One Perf", "W6210 (4560MMX_b fingerprint)"),
    ("Android Nexus5X WebView Perf", "Nexus 5X"),
    ("Android Nexus6 WebView Tester", "Nexus 6"),
];

/// Low-memory device models
pub const SVELTE_DEVICES: &[&str] = &["W6210 (4560MMX_b fingerprint)"];

/// Devices which are broken right now. Tests will not be scheduled on them.
/// Please add a comment with a bug for replacing the device.
pub const BLACKLISTED_DEVICES: &[&str] = &[];

// Additional compile targets to add to builders.
// On desktop builders, chromedriver is added as an additional compile target.
// The perf waterfall builds this target for each commit, and the resulting
// ChromeDriver is archived together with Chrome for use in bisecting.
const BUILDER_ADDITIONAL_COMPILE_TARGETS: &[(&str, &[&str])] = &[
    ("Android Compile", &["microdump_stackwalk", "angle_perftests"]),
    (
        "Android arm64 Compile",
        &["microdump_stackwalk", "angle_perftests"],
    ),
    ("Linux Builder", &["chromedriver"]),
    ("Mac Builder", &["chromedriver"]),
    ("Win Builder", &["chromedriver"]),
    ("Win x64 Builder", &["chromedriver"]),
];

#[must_use]
pub fn android_device_type(tester_name: &str) -> Option<&'static str> {
    ANDROID_BOT_TO_DEVICE_TYPE
        .iter()
        .find(|(bot, _)| *bot == tester_name)
        .map(|(_, device)| *device)
}

fn device(host: &str, n: u32) -> String {
    format!("{host}--device{n}")
}

/// Android hosts carry seven attached devices each
fn android_pool_devices(hosts: &[&str]) -> Vec<String> {
    hosts
        .iter()
        .flat_map(|host| (1..=7).map(|n| device(host, n)))
        .collect()
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn perf_test(name: &'static str, device_id: String) -> PerfTest {
    PerfTest { name, device_id }
}

fn tester(platform: Platform, swarming: DimensionPool) -> TesterConfig {
    TesterConfig {
        platform,
        target_bits: 64,
        num_host_shards: 1,
        num_device_shards: 1,
        replace_system_webview: false,
        swarming_dimensions: vec![swarming],
    }
}

fn android_pool(
    pool: &'static str,
    hosts: &[&str],
    perf_tests: Vec<PerfTest>,
    perf_tests_with_args: Vec<PerfTestWithArgs>,
) -> DimensionPool {
    DimensionPool {
        os: "Android",
        pool,
        gpu: None,
        device_ids: android_pool_devices(hosts),
        perf_tests,
        perf_tests_with_args,
    }
}

fn desktop_pool(
    os: &'static str,
    gpu: &'static str,
    device_ids: &[&str],
    perf_tests: Vec<PerfTest>,
    perf_tests_with_args: Vec<PerfTestWithArgs>,
) -> DimensionPool {
    DimensionPool {
        os,
        pool: "Chrome-perf",
        gpu: Some(gpu),
        device_ids: ids(device_ids),
        perf_tests,
        perf_tests_with_args,
    }
}

/// Build the full waterfall from the literal tables
#[must_use]
pub fn waterfall_config() -> Waterfall {
    let mut waterfall = Waterfall::default();

    for (builder, targets) in BUILDER_ADDITIONAL_COMPILE_TARGETS {
        waterfall.builders.insert(
            (*builder).to_string(),
            BuilderConfig {
                additional_compile_targets: Some(
                    targets.iter().map(|t| (*t).to_string()).collect(),
                ),
            },
        );
    }

    let mut add = |name: &str, config: TesterConfig| {
        waterfall.testers.insert(name.to_string(), config);
    };

    add(
        "Android Nexus5X Perf",
        tester(
            Platform::Android,
            android_pool(
                "Chrome-perf",
                &["build73-b1", "build74-b1", "build75-b1"],
                vec![
                    perf_test("tracing_perftests", device("build73-b1", 2)),
                    perf_test("gpu_perftests", device("build73-b1", 2)),
                    perf_test("media_perftests", device("build74-b1", 7)),
                    perf_test("components_perftests", device("build74-b1", 1)),
                ],
                vec![PerfTestWithArgs {
                    step_name: "angle_perftests",
                    device_id: device("build73-b1", 4),
                    args: &["--shard-timeout=300"],
                    isolate_name: "angle_perftests",
                }],
            ),
        ),
    );

    add(
        "Android Nexus5 Perf",
        tester(
            Platform::Android,
            android_pool(
                "Chrome-perf",
                &["build13-b1", "build14-b1", "build48-b1"],
                vec![
                    perf_test("tracing_perftests", device("build13-b1", 2)),
                    perf_test("gpu_perftests", device("build13-b1", 2)),
                    perf_test("components_perftests", device("build48-b1", 5)),
                ],
                vec![PerfTestWithArgs {
                    step_name: "angle_perftests",
                    device_id: device("build13-b1", 3),
                    args: &["--shard-timeout=300"],
                    isolate_name: "angle_perftests",
                }],
            ),
        ),
    );

    add(
        "Android Nexus6 Perf",
        tester(
            Platform::Android,
            android_pool(
                "Chrome-perf",
                &["build15-b1", "build16-b1", "build45-b1"],
                vec![
                    perf_test("tracing_perftests", device("build15-b1", 2)),
                    perf_test("gpu_perftests", device("build16-b1", 2)),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Android Nexus7v2 Perf",
        tester(
            Platform::Android,
            android_pool(
                "Chrome-perf",
                &["build9-b1", "build10-b1", "build49-b1"],
                vec![
                    perf_test("tracing_perftests", device("build9-b1", 2)),
                    perf_test("gpu_perftests", device("build10-b1", 2)),
                ],
                vec![PerfTestWithArgs {
                    step_name: "angle_perftests",
                    device_id: device("build49-b1", 7),
                    args: &["--shard-timeout=300"],
                    isolate_name: "angle_perftests",
                }],
            ),
        ),
    );

    add(
        "Android One Perf",
        tester(
            Platform::Android,
            android_pool(
                "Chrome-perf",
                &["build17-b1", "build18-b1", "build47-b1"],
                // gpu_perftests disabled on this device, crbug.com/775219
                vec![perf_test("tracing_perftests", device("build17-b1", 2))],
                vec![],
            ),
        ),
    );

    let mut webview_n5x = tester(
        Platform::Android,
        android_pool(
            "chrome.tests.perf",
            &["build188-b7", "build189-b7", "build190-b7"],
            vec![],
            vec![],
        ),
    );
    webview_n5x.replace_system_webview = true;
    add("Android Nexus5X WebView Perf", webview_n5x);

    let mut webview_n6 = tester(
        Platform::Android,
        android_pool(
            "Chrome-perf",
            &["build112-b1", "build113-b1", "build114-b1"],
            vec![],
            vec![],
        ),
    );
    webview_n6.replace_system_webview = true;
    add("Android Nexus6 WebView Perf", webview_n6);

    add(
        "Win 10 High-DPI Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-10",
                "8086:1616",
                &[
                    "build117-b1",
                    "build118-b1",
                    "build119-b1",
                    "build120-b1",
                    "build180-b4", // Added in https://crbug.com/695613
                ],
                vec![],
                vec![],
            ),
        ),
    );

    add(
        "Win 10 Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-10",
                "8086:5912",
                &[
                    "build189-a9",
                    "build190-a9",
                    "build191-a9",
                    "build192-a9",
                    "build193-a9",
                ],
                vec![
                    perf_test("media_perftests", "build189-a9".to_string()),
                    perf_test("views_perftests", "build190-a9".to_string()),
                    perf_test("components_perftests", "build191-a9".to_string()),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Win 8 Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-2012ServerR2-SP0",
                "102b:0532",
                &[
                    "build143-m1",
                    "build144-m1",
                    "build145-m1",
                    "build146-m1",
                    "build147-m1",
                ],
                vec![
                    perf_test("load_library_perf_tests", "build145-m1".to_string()),
                    perf_test("performance_browser_tests", "build145-m1".to_string()),
                    perf_test("media_perftests", "build146-m1".to_string()),
                ],
                vec![],
            ),
        ),
    );

    let mut win7 = tester(
        Platform::Win,
        desktop_pool(
            "Windows-2008ServerR2-SP1",
            "102b:0532",
            &[
                "build185-m1",
                "build186-m1",
                "build187-m1",
                "build188-m1",
                "build189-m1",
            ],
            vec![
                perf_test("load_library_perf_tests", "build187-m1".to_string()),
                // performance_browser_tests disabled, crbug.com/735679
                perf_test("media_perftests", "build188-m1".to_string()),
                perf_test("components_perftests", "build189-m1".to_string()),
            ],
            vec![],
        ),
    );
    win7.target_bits = 32;
    add("Win 7 Perf", win7);

    add(
        "Win 7 x64 Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-2008ServerR2-SP1",
                "102b:0532",
                &[
                    "build138-m1",
                    "build139-m1",
                    "build140-m1",
                    "build141-m1",
                    "build142-m1",
                ],
                vec![
                    perf_test("load_library_perf_tests", "build140-m1".to_string()),
                    perf_test("performance_browser_tests", "build140-m1".to_string()),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Win 7 ATI GPU Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-2008ServerR2-SP1",
                "1002:6613",
                &[
                    "build101-m1",
                    "build102-m1",
                    "build103-m1",
                    "build104-m1",
                    "build105-m1",
                ],
                vec![
                    // angle_perftests disabled, crbug.com/785291
                    perf_test("load_library_perf_tests", "build103-m1".to_string()),
                    perf_test("performance_browser_tests", "build103-m1".to_string()),
                    perf_test("media_perftests", "build104-m1".to_string()),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Win 7 Intel GPU Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-2008ServerR2-SP1",
                "8086:041a",
                &[
                    "build164-m1",
                    "build165-m1",
                    "build166-m1",
                    "build167-m1",
                    "build168-m1",
                ],
                vec![
                    perf_test("angle_perftests", "build166-m1".to_string()),
                    perf_test("load_library_perf_tests", "build166-m1".to_string()),
                    perf_test("performance_browser_tests", "build166-m1".to_string()),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Win 7 Nvidia GPU Perf",
        tester(
            Platform::Win,
            desktop_pool(
                "Windows-2008ServerR2-SP1",
                "10de:1cb3",
                &[
                    "build92-m1",
                    "build93-m1",
                    "build94-m1",
                    "build95-m1",
                    "build96-m1",
                ],
                vec![
                    perf_test("angle_perftests", "build94-m1".to_string()),
                    perf_test("load_library_perf_tests", "build94-m1".to_string()),
                    // performance_browser_tests disabled, crbug.com/735679
                    perf_test("media_perftests", "build95-m1".to_string()),
                ],
                vec![
                    PerfTestWithArgs {
                        step_name: "passthrough_command_buffer_perftests",
                        device_id: "build94-m1".to_string(),
                        args: &["--use-cmd-decoder=passthrough", "--use-angle=gl-null"],
                        isolate_name: "command_buffer_perftests",
                    },
                    PerfTestWithArgs {
                        step_name: "validating_command_buffer_perftests",
                        device_id: "build94-m1".to_string(),
                        args: &["--use-cmd-decoder=validating", "--use-stub"],
                        isolate_name: "command_buffer_perftests",
                    },
                ],
            ),
        ),
    );

    add(
        "Mac 10.12 Perf",
        tester(
            Platform::Mac,
            desktop_pool(
                "Mac-10.12",
                "8086:0a2e",
                &[
                    "build158-m1",
                    "build159-m1",
                    "build160-m1",
                    "build161-m1",
                    "build162-m1",
                ],
                vec![
                    perf_test("net_perftests", "build159-m1".to_string()),
                    perf_test("views_perftests", "build160-m1".to_string()),
                ],
                vec![],
            ),
        ),
    );

    add(
        "Mac Pro 10.11 Perf",
        tester(
            Platform::Mac,
            desktop_pool(
                "Mac-10.11",
                "1002:6821",
                &[
                    "build128-b1",
                    "build129-b1",
                    "build130-b1",
                    "build131-b1",
                    "build132-b1",
                ],
                vec![perf_test(
                    "performance_browser_tests",
                    "build132-b1".to_string(),
                )],
                vec![],
            ),
        ),
    );

    add(
        "Mac Air 10.11 Perf",
        tester(
            Platform::Mac,
            desktop_pool(
                "Mac-10.11",
                "8086:1626",
                &[
                    "build123-b1",
                    "build124-b1",
                    "build125-b1",
                    "build126-b1",
                    "build127-b1",
                ],
                vec![perf_test(
                    "performance_browser_tests",
                    "build126-b1".to_string(),
                )],
                vec![],
            ),
        ),
    );

    waterfall
}

fn dimension(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Testers on the FYI waterfall, driven by the new perf recipe. These get
/// one generated entry per isolate and are merged into the existing FYI
/// JSON rather than regenerated from scratch.
#[must_use]
pub fn fyi_testers() -> BTreeMap<String, RecipeTester> {
    let mut testers = BTreeMap::new();

    testers.insert(
        "Mac 10.13 Laptop High End".to_string(),
        RecipeTester {
            tests: vec![
                RecipeTest {
                    isolate: "performance_test_suite",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[],
                    telemetry: true,
                },
                RecipeTest {
                    isolate: "net_perftests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[0],
                    telemetry: false,
                },
                RecipeTest {
                    isolate: "views_perftests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[1],
                    telemetry: false,
                },
            ],
            platform: Platform::Mac,
            dimension: dimension(&[
                ("pool", "Chrome-perf-fyi"),
                ("os", "Mac-10.13"),
                ("gpu", "1002:6821"),
            ]),
            device_ids: ids(&[
                "build246-a9",
                "build247-a9",
                "build248-a9",
                "build249-a9",
                "build250-a9",
                "build251-a9",
                "build252-a9",
                "build253-a9",
                "build254-a9",
                "build255-a9",
                "build256-a9",
                "build257-a9",
                "build258-a9",
                "build259-a9",
                "build260-a9",
                "build261-a9",
                "build262-a9",
                "build263-a9",
                "build264-a9",
                "build265-a9",
                "build266-a9",
                "build267-a9",
                "build268-a9",
                "build269-a9",
                "build270-a9",
                "build271-a9",
            ]),
            testing: false,
            replace_system_webview: false,
        },
    );

    testers.insert(
        "One Buildbot Step Test Builder".to_string(),
        RecipeTester {
            tests: vec![
                RecipeTest {
                    isolate: "telemetry_perf_tests_experimental",
                    test_suite: None,
                    extra_args: &["--xvfb"],
                    shards: &[],
                    telemetry: true,
                },
                RecipeTest {
                    isolate: "load_library_perf_tests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[0],
                    telemetry: false,
                },
            ],
            platform: Platform::Linux,
            dimension: dimension(&[("pool", "chrome.tests.perf-fyi"), ("os", "Linux")]),
            device_ids: ids(&["swarm77-c7", "swarm78-c7", "swarm79-c7"]),
            testing: true,
            replace_system_webview: false,
        },
    );

    testers.insert(
        "Android Go".to_string(),
        RecipeTester {
            tests: vec![RecipeTest {
                isolate: "performance_test_suite",
                test_suite: None,
                extra_args: &[],
                shards: &[],
                telemetry: true,
            }],
            platform: Platform::Android,
            dimension: dimension(&[("pool", "chrome.tests.perf-fyi"), ("os", "Android")]),
            device_ids: android_pool_devices(&["build30-a7", "build31-a7"]),
            testing: false,
            replace_system_webview: false,
        },
    );

    testers
}

/// Testers already migrated off the old recipe; their entries are added
/// on top of the generated waterfall JSON.
#[must_use]
pub fn migrated_testers() -> BTreeMap<String, RecipeTester> {
    let mut testers = BTreeMap::new();

    testers.insert(
        "mac-10_12_laptop_low_end-perf".to_string(),
        RecipeTester {
            tests: vec![
                RecipeTest {
                    isolate: "performance_test_suite",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[],
                    telemetry: true,
                },
                RecipeTest {
                    isolate: "load_library_perf_tests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[0],
                    telemetry: false,
                },
            ],
            platform: Platform::Mac,
            dimension: dimension(&[
                ("pool", "chrome.tests.perf"),
                ("os", "Mac-10.12"),
                ("gpu", "8086:1626"),
            ]),
            device_ids: (41..=66).map(|n| format!("build{n}-a7")).collect(),
            testing: false,
            replace_system_webview: false,
        },
    );

    testers.insert(
        "linux-perf".to_string(),
        RecipeTester {
            // Add views_perftests, crbug.com/811766
            tests: vec![
                RecipeTest {
                    isolate: "performance_test_suite",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[],
                    telemetry: true,
                },
                RecipeTest {
                    isolate: "load_library_perf_tests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[0],
                    telemetry: false,
                },
                RecipeTest {
                    isolate: "net_perftests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[1],
                    telemetry: false,
                },
                RecipeTest {
                    isolate: "tracing_perftests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[2],
                    telemetry: false,
                },
                RecipeTest {
                    isolate: "media_perftests",
                    test_suite: None,
                    extra_args: &[],
                    shards: &[3],
                    telemetry: false,
                },
            ],
            platform: Platform::Linux,
            dimension: dimension(&[
                ("gpu", "10de:1cb3"),
                ("os", "Ubuntu-14.04"),
                ("pool", "chrome.tests.perf"),
            ]),
            device_ids: (67..=92).map(|n| format!("build{n}-a7")).collect(),
            testing: false,
            replace_system_webview: false,
        },
    );

    testers
}

/// Map a builder name to its pass-through output config
#[must_use]
pub fn builder_names() -> Vec<&'static str> {
    BUILDER_ADDITIONAL_COMPILE_TARGETS
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

#[must_use]
pub fn is_builder(name: &str) -> bool {
    BUILDER_ADDITIONAL_COMPILE_TARGETS
        .iter()
        .any(|(builder, _)| *builder == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_pools_have_seven_devices_per_host() {
        let waterfall = waterfall_config();
        let tester = &waterfall.testers["Android Nexus5X Perf"];
        let pool = &tester.swarming_dimensions[0];
        assert_eq!(pool.device_ids.len(), 21);
        assert!(pool.device_ids.contains(&"build73-b1--device1".to_string()));
        assert!(pool.device_ids.contains(&"build75-b1--device7".to_string()));
    }

    #[test]
    fn pinned_perf_tests_reference_pool_devices() {
        let waterfall = waterfall_config();
        for (name, tester) in &waterfall.testers {
            for pool in &tester.swarming_dimensions {
                for test in &pool.perf_tests {
                    assert!(
                        pool.device_ids.contains(&test.device_id),
                        "{name}: {} pinned to unknown device {}",
                        test.name,
                        test.device_id
                    );
                }
                for test in &pool.perf_tests_with_args {
                    assert!(
                        pool.device_ids.contains(&test.device_id),
                        "{name}: {} pinned to unknown device {}",
                        test.step_name,
                        test.device_id
                    );
                }
            }
        }
    }

    #[test]
    fn win7_is_32_bit() {
        let waterfall = waterfall_config();
        assert_eq!(waterfall.testers["Win 7 Perf"].target_bits, 32);
        assert_eq!(waterfall.testers["Win 7 x64 Perf"].target_bits, 64);
    }
}
