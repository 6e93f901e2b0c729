//! Artifact file read/write and staleness checking
//!
//! The generator owns three files in the configuration directory. Validate
//! mode renders the same artifacts in memory and byte-compares them against
//! what is on disk, reporting the names of files that need regenerating.

use crate::Result;
use crate::services::generate::Artifacts;
use std::fs;
use std::path::Path;

pub const WATERFALL_JSON: &str = "chromium.perf.json";
pub const FYI_WATERFALL_JSON: &str = "chromium.perf.fyi.json";
pub const BENCHMARK_CSV: &str = "benchmark.csv";

fn files_of(artifacts: &Artifacts) -> [(&'static str, &str); 3] {
    [
        (WATERFALL_JSON, artifacts.waterfall_json.as_str()),
        (FYI_WATERFALL_JSON, artifacts.fyi_json.as_str()),
        (BENCHMARK_CSV, artifacts.benchmark_csv.as_str()),
    ]
}

/// Current contents of the FYI waterfall file, if it exists. The FYI
/// generator only rewrites its own testers, so everything else in the file
/// has to survive a regeneration.
pub fn read_existing_fyi(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(FYI_WATERFALL_JSON);
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

/// Write all three artifacts into `dir`, creating it if needed
pub fn write_artifacts(dir: &Path, artifacts: &Artifacts) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (name, content) in files_of(artifacts) {
        fs::write(dir.join(name), content)?;
    }
    Ok(())
}

/// Compare rendered artifacts against the files in `dir` and return the
/// names of files that are missing or out of date.
pub fn validate_artifacts(dir: &Path, artifacts: &Artifacts) -> Result<Vec<String>> {
    let mut stale = Vec::new();
    for (name, content) in files_of(artifacts) {
        let path = dir.join(name);
        let on_disk = if path.is_file() { Some(fs::read_to_string(&path)?) } else { None };
        if on_disk.as_deref() != Some(content) {
            stale.push(name.to_string());
        }
    }
    Ok(stale)
}
