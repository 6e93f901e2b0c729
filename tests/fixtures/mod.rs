//! Test fixtures for deterministic testing

use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a file and make sure parent directories exist
pub fn write_file_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(contents)
}

/// Create a small legacy source tree for rename-plan tests
pub fn create_source_tree_fixture(base: &Path) -> std::io::Result<()> {
    let files = [
        "Source/core/dom/Document.cpp",
        "Source/core/dom/Document.h",
        "Source/core/inspector/InspectorDOMAgent.cpp",
        "Source/core/frame/Settings.json5",
        "Source/devtools/node_modules/pkg/index.js",
        "Source/web/WebKit.cpp",
        "common/feature_policy/feature_policy.cpp",
        "public/web/WebFrame.h",
        "public/web/WebKit.h",
        "public/BUILD.gn",
    ];
    for file in files {
        write_file_sync(&base.join(file), b"// placeholder\n")?;
    }
    Ok(())
}

/// Flakiness data for two builders, as the JSON provider expects it
pub fn bot_data_json() -> &'static str {
    r#"{
  "Linux Tests": {
    "fast/dom/flaky.html": ["Pass", "Failure"],
    "fast/dom/stable.html": ["Pass"]
  },
  "Win Tests": {
    "fast/dom/flaky.html": ["Timeout"],
    "fast/css/other-flaky.html": ["Pass", "Crash"]
  }
}
"#
}
