//! Flaky test expectations updater
//!
//! Pulls per-builder flakiness data and folds it into a TestExpectations
//! file: tests observed with more than one distinct result on a bot get an
//! expectation line listing every observed outcome, so the harness stops
//! treating their flakes as hard failures. Existing lines are preserved;
//! the routine only appends lines for tests not yet covered.

use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Results observed for one builder, keyed by test path
#[derive(Debug, Clone, Default)]
pub struct BotExpectations {
    pub results_by_test: BTreeMap<String, BTreeSet<String>>,
}

/// Source of per-builder flakiness data. Returns `None` for builders the
/// data source has never heard of.
pub trait BotDataProvider {
    fn expectations_for_builder(&self, builder: &str) -> Result<Option<BotExpectations>>;
}

/// [`BotDataProvider`] backed by a JSON file of shape
/// `{"Builder Name": {"test/path.html": ["Pass", "Failure"]}}`.
pub struct JsonBotDataProvider {
    by_builder: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl JsonBotDataProvider {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let by_builder = serde_json::from_str(&raw)?;
        Ok(JsonBotDataProvider { by_builder })
    }
}

impl BotDataProvider for JsonBotDataProvider {
    fn expectations_for_builder(&self, builder: &str) -> Result<Option<BotExpectations>> {
        Ok(self.by_builder.get(builder).map(|tests| BotExpectations {
            results_by_test: tests
                .iter()
                .map(|(test, results)| (test.clone(), results.iter().cloned().collect()))
                .collect(),
        }))
    }
}

/// Filesystem access for the expectations file, mockable in tests
pub trait Host {
    fn read_text(&self, path: &Path) -> Result<String>;
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// [`Host`] backed by the real filesystem
#[derive(Debug, Default)]
pub struct OsHost;

impl Host for OsHost {
    fn read_text(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        Ok(fs::write(path, content)?)
    }
}

fn test_path_of_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    trimmed.split_whitespace().find(|token| !token.starts_with('['))
}

/// Merge flaky results from `builders` into the expectations file at
/// `expectations_path`. Returns the number of lines added.
pub fn update_expectations<H: Host, P: BotDataProvider>(
    host: &H,
    provider: &P,
    expectations_path: &Path,
    builders: &[String],
) -> Result<usize> {
    let original = host.read_text(expectations_path)?;
    let covered: BTreeSet<&str> = original.lines().filter_map(test_path_of_line).collect();

    // Union observed results across builders before deciding flakiness
    let mut observed: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for builder in builders {
        let Some(bot) = provider.expectations_for_builder(builder)? else {
            return Err(Error::InvalidInput(format!("no flakiness data for builder: {builder}")));
        };
        for (test, results) in bot.results_by_test {
            observed.entry(test).or_default().extend(results);
        }
    }

    let mut added = Vec::new();
    for (test, results) in &observed {
        if results.len() < 2 || covered.contains(test.as_str()) {
            continue;
        }
        let results = results.iter().cloned().collect::<Vec<_>>().join(" ");
        added.push(format!("{test} [ {results} ]"));
    }

    if added.is_empty() {
        return Ok(0);
    }

    let mut updated = original;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    for line in &added {
        updated.push_str(line);
        updated.push('\n');
    }
    host.write_text(expectations_path, &updated)?;
    Ok(added.len())
}
