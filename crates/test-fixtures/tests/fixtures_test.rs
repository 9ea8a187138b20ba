//! Every scenario file must parse and script consistent collaborators.

use fermi_core::traits::{EvidenceProvider, ModelProposer, SampleProvider};
use test_fixtures::{load_scenario, read_scenario, scenario_files};

#[test]
fn all_scenarios_parse() {
    let files = scenario_files();
    assert!(files.len() >= 4, "expected scenario fixtures, found {}", files.len());
    for path in files {
        let scenario = read_scenario(&path).unwrap_or_else(|e| panic!("{e}"));
        assert!(!scenario.query.is_empty());
        if let Some(toml) = &scenario.config {
            fermi_core::FermiConfig::from_toml(toml)
                .unwrap_or_else(|e| panic!("{} config invalid: {e}", path.display()));
        }
    }
}

#[test]
fn scenario_files_are_sorted_json() {
    let names: Vec<String> = scenario_files()
        .iter()
        .filter_map(|p| p.file_stem()?.to_str().map(str::to_string))
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"market_size".to_string()));
}

#[test]
fn missing_scenario_is_an_error() {
    let err = read_scenario(&test_fixtures::scenarios_dir().join("nope.json")).unwrap_err();
    assert!(err.starts_with("read "));
}

#[test]
fn market_size_scenario_scripts_collaborators() {
    let scenario = load_scenario("market_size");
    let query = scenario.query();
    assert_eq!(query.context().number("customers"), Some(1000.0));

    let models = scenario
        .proposer()
        .propose(&query, &Default::default())
        .unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].variables.len(), 3);

    let prior = scenario
        .prior_provider()
        .lookup(&query.child("adoption_rate"))
        .unwrap()
        .unwrap();
    assert_eq!(prior.value, Some(0.2));
    assert!(scenario.prior_provider().lookup(&query).unwrap().is_none());
}

#[test]
fn consensus_scenario_scripts_samples() {
    let scenario = load_scenario("noisy_consensus");
    let samples = scenario.sampler().samples(&scenario.query()).unwrap();
    assert_eq!(samples.len(), 6);
}
