//! Deterministic collaborators and scenario fixtures for Fermi integration tests.
//!
//! Every mock is scripted up front and keyed by normalized query text, so a
//! test fully controls what each recursive sub-query sees.

pub mod mocks;
pub mod scenario;

pub use mocks::{
    ChainProposer, FailingProvider, PanickingProvider, ScriptedBenchmarks, ScriptedProposer,
    ScriptedProvider, ScriptedSampler,
};
pub use scenario::{ExpectedOutcome, ModelSpec, PriorSpec, Scenario};

use std::path::{Path, PathBuf};

/// Directory holding the scenario JSON files, inside this crate.
pub fn scenarios_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

/// Load `scenarios/<name>.json`.
///
/// # Panics
/// Panics if the scenario is missing or malformed.
pub fn load_scenario(name: &str) -> Scenario {
    let path = scenarios_dir().join(format!("{name}.json"));
    read_scenario(&path).unwrap_or_else(|e| panic!("scenario {name}: {e}"))
}

/// Parse one scenario file.
pub fn read_scenario(path: &Path) -> Result<Scenario, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))
}

/// Every scenario file, sorted by name.
pub fn scenario_files() -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(scenarios_dir()) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}
