//! Rename planning for the source tree reorganization
//!
//! Computes where each file of the legacy layout lands in the new layout:
//! `Source/` moves under `renderer/`, `common/` and `public/` stay put, and
//! C++-adjacent files additionally get lowercased snake_case basenames with
//! `.cpp` becoming `.cc`.

use crate::services::name_style::to_snake_case;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Extensions whose basenames are rewritten. `Settings.json5` files are
/// rewritten too since generated C++ includes them by name.
const CONVERTIBLE_SUFFIXES: &[&str] =
    &[".h", ".cpp", ".mm", ".idl", ".typemap", ".proto", "Settings.json5"];

/// Inspector-related files whose includes are generated by a script outside
/// the tree; renaming them would break that generator.
fn is_excluded_basename(basename: &str) -> bool {
    basename
        .strip_prefix("Inspector")
        .is_some_and(|rest| rest.contains("Agent"))
        || basename.starts_with("AdTracker")
        || basename == "InspectorTraceEvents"
        || basename == "PerformanceMonitor"
        || basename == "PlatformTraceEventsAgent"
}

fn split_dir_base(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

fn split_ext(basename: &str) -> (&str, &str) {
    match basename.rfind('.') {
        Some(idx) if idx > 0 => (&basename[..idx], &basename[idx..]),
        _ => (basename, ""),
    }
}

fn join_dir_base(dirname: &str, basename: String) -> String {
    if dirname.is_empty() {
        basename
    } else {
        format!("{dirname}/{basename}")
    }
}

/// Destination path for `filename`, a `/`-separated path relative to the
/// legacy tree root. The result is relative to the new tree root.
pub fn relative_dest(filename: &str) -> Result<String> {
    let dest = if let Some(rest) = filename.strip_prefix("Source") {
        format!("renderer{rest}")
    } else if filename.starts_with("common") || filename.starts_with("public") {
        filename.to_string()
    } else {
        return Err(Error::InvalidInput(format!(
            "path must start with \"common\", \"public\", or \"Source\": {filename}"
        )));
    };

    if !CONVERTIBLE_SUFFIXES.iter().any(|s| filename.ends_with(s)) {
        return Ok(dest);
    }

    let (dirname, basename) = split_dir_base(&dest);
    let (mut basename, mut ext) = split_ext(basename);
    if is_excluded_basename(basename) {
        return Ok(dest.clone());
    }
    if filename.ends_with(".cpp") {
        ext = ".cc";
    }
    // The legacy umbrella header keeps its role under the new project name
    if basename == "WebKit" && ext == ".h" {
        basename = "blink";
    }
    let basename = if basename.chars().any(|c| c.is_ascii_uppercase()) {
        to_snake_case(basename)
    } else {
        basename.to_string()
    };
    Ok(join_dir_base(dirname, format!("{basename}{ext}")))
}

fn start_with_list(name: &str, prefixes: &[String]) -> bool {
    prefixes.is_empty() || prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

fn files_under(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            files_under(root, &path, out)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push(rel);
        }
    }
    Ok(())
}

/// Compute the full rename plan for the tree rooted at `root`.
///
/// Walks `Source/`, `common/`, and `public/`, skips anything under a
/// `node_modules/` directory, and keeps only paths starting with one of
/// `prefixes` (an empty list keeps everything). Pairs come back sorted by
/// source path.
pub fn plan_move(root: &Path, prefixes: &[String]) -> Result<Vec<(String, String)>> {
    let mut files = Vec::new();
    for top in ["Source", "common", "public"] {
        let dir = root.join(top);
        if dir.is_dir() {
            files_under(root, &dir, &mut files)?;
        }
    }
    files.sort();

    let mut pairs = Vec::new();
    for f in files {
        if f.contains("node_modules") || !start_with_list(&f, prefixes) {
            continue;
        }
        let dest = relative_dest(&f)?;
        pairs.push((f, dest));
    }
    Ok(pairs)
}
