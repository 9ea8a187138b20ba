//! Scripted collaborators.

use std::collections::BTreeMap;
use std::sync::Mutex;

use fermi_core::errors::{EvidenceError, ProposerError};
use fermi_core::models::{
    normalize_key, BenchmarkCandidate, DecompositionModel, EstimationResult, EvidenceItem, Query,
    StrategyKind,
};
use fermi_core::traits::{BenchmarkProvider, EvidenceProvider, ModelProposer, SampleProvider};

// ─── Proposers ──────────────────────────────────────────────────────────────

/// Returns a fixed model list per query key; nothing for unknown queries.
#[derive(Debug, Default)]
pub struct ScriptedProposer {
    models: BTreeMap<String, Vec<DecompositionModel>>,
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedProposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A proposer that always errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_models(mut self, query: &str, models: Vec<DecompositionModel>) -> Self {
        self.models.insert(normalize_key(query), models);
        self
    }

    /// Shorthand for one model whose variables come from the formula.
    pub fn with_formula(mut self, query: &str, id: &str, formula: &str) -> Self {
        let model = DecompositionModel::new(id, formula, format!("{query} via {formula}"));
        self.models.entry(normalize_key(query)).or_default().push(model);
        self
    }

    /// Query keys seen so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ModelProposer for ScriptedProposer {
    fn propose(
        &self,
        query: &Query,
        _known: &BTreeMap<String, f64>,
    ) -> Result<Vec<DecompositionModel>, ProposerError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.key());
        }
        if self.fail {
            return Err(ProposerError::Unavailable("scripted failure".to_string()));
        }
        Ok(self.models.get(&query.key()).cloned().unwrap_or_default())
    }
}

/// Adversarial proposer: every query `q` decomposes into `q_next * 2`, forever.
///
/// Names never repeat, so only the depth bound stops the recursion.
#[derive(Debug, Default)]
pub struct ChainProposer {
    calls: Mutex<usize>,
}

impl ChainProposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }
}

impl ModelProposer for ChainProposer {
    fn propose(
        &self,
        query: &Query,
        _known: &BTreeMap<String, f64>,
    ) -> Result<Vec<DecompositionModel>, ProposerError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        let next: String = query
            .key()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect::<String>()
            + "_next";
        Ok(vec![DecompositionModel::new(
            format!("chain:{}", query.key()),
            format!("{next} * 2"),
            "self-extending chain",
        )])
    }
}

// ─── Evidence providers ─────────────────────────────────────────────────────

/// Answers point lookups from a script; `Ok(None)` for anything else.
#[derive(Debug)]
pub struct ScriptedProvider {
    name: String,
    strategy: StrategyKind,
    answers: BTreeMap<String, (f64, f64)>,
}

impl ScriptedProvider {
    /// A provider whose answers are attributed to `strategy`.
    pub fn new(name: &str, strategy: StrategyKind) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            answers: BTreeMap::new(),
        }
    }

    pub fn answer(mut self, query: &str, value: f64, confidence: f64) -> Self {
        self.answers.insert(normalize_key(query), (value, confidence));
        self
    }
}

impl EvidenceProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, query: &Query) -> Result<Option<EstimationResult>, EvidenceError> {
        Ok(self.answers.get(&query.key()).map(|(value, confidence)| {
            EstimationResult::point(self.strategy, *value, *confidence)
                .with_trace(format!("{} answered {value}", self.name))
                .with_evidence(EvidenceItem::number(self.name.clone(), *value, *confidence))
        }))
    }
}

/// Always reports the source as unavailable.
#[derive(Debug, Default)]
pub struct FailingProvider;

impl EvidenceProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn lookup(&self, _query: &Query) -> Result<Option<EstimationResult>, EvidenceError> {
        Err(EvidenceError::Unavailable {
            source_name: "failing".to_string(),
            reason: "scripted outage".to_string(),
        })
    }
}

/// Panics on every lookup.
#[derive(Debug, Default)]
pub struct PanickingProvider;

impl EvidenceProvider for PanickingProvider {
    fn name(&self) -> &str {
        "panicking"
    }

    fn lookup(&self, _query: &Query) -> Result<Option<EstimationResult>, EvidenceError> {
        panic!("scripted collaborator panic")
    }
}

// ─── Samples and benchmarks ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ScriptedSampler {
    samples: BTreeMap<String, Vec<f64>>,
}

impl ScriptedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples_for(mut self, query: &str, samples: Vec<f64>) -> Self {
        self.samples.insert(normalize_key(query), samples);
        self
    }
}

impl SampleProvider for ScriptedSampler {
    fn name(&self) -> &str {
        "scripted-sampler"
    }

    fn samples(&self, query: &Query) -> Result<Vec<EvidenceItem>, EvidenceError> {
        Ok(self
            .samples
            .get(&query.key())
            .map(|values| {
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| EvidenceItem::number(format!("sample-{i}"), *v, 0.5))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedBenchmarks {
    candidates: BTreeMap<String, Vec<BenchmarkCandidate>>,
}

impl ScriptedBenchmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates_for(mut self, query: &str, candidates: Vec<BenchmarkCandidate>) -> Self {
        self.candidates.insert(normalize_key(query), candidates);
        self
    }
}

impl BenchmarkProvider for ScriptedBenchmarks {
    fn name(&self) -> &str {
        "scripted-benchmarks"
    }

    fn candidates(&self, query: &Query) -> Result<Vec<BenchmarkCandidate>, EvidenceError> {
        Ok(self.candidates.get(&query.key()).cloned().unwrap_or_default())
    }
}
