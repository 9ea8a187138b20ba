//! End-to-end scenario fixtures.

use std::collections::BTreeMap;

use fermi_core::models::{BenchmarkCandidate, Context, DecompositionModel, Query, StrategyKind};
use serde::{Deserialize, Serialize};

use crate::mocks::{ScriptedBenchmarks, ScriptedProposer, ScriptedProvider, ScriptedSampler};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub id: String,
    pub formula: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl ModelSpec {
    pub fn to_model(&self) -> DecompositionModel {
        DecompositionModel::new(&self.id, &self.formula, &self.description)
            .with_variables(self.variables.iter().cloned())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriorSpec {
    pub value: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub value_range: Option<(f64, f64)>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
}

fn default_tolerance() -> f64 {
    1e-6
}

/// One scripted estimation problem: the query, what every collaborator
/// answers, an optional TOML config overlay, and the expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub context: Context,
    /// Decomposition models keyed by query text.
    #[serde(default)]
    pub models: BTreeMap<String, Vec<ModelSpec>>,
    /// Generative-prior answers keyed by query text.
    #[serde(default)]
    pub priors: BTreeMap<String, PriorSpec>,
    #[serde(default)]
    pub samples: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub benchmarks: BTreeMap<String, Vec<BenchmarkCandidate>>,
    /// TOML layered over the compiled defaults.
    #[serde(default)]
    pub config: Option<String>,
    pub expected: ExpectedOutcome,
}

impl Scenario {
    pub fn query(&self) -> Query {
        Query::with_context(self.query.clone(), self.context.clone())
    }

    pub fn proposer(&self) -> ScriptedProposer {
        self.models
            .iter()
            .fold(ScriptedProposer::new(), |proposer, (query, specs)| {
                proposer.with_models(query, specs.iter().map(ModelSpec::to_model).collect())
            })
    }

    pub fn prior_provider(&self) -> ScriptedProvider {
        self.priors.iter().fold(
            ScriptedProvider::new("scripted-prior", StrategyKind::GenerativePrior),
            |provider, (query, prior)| provider.answer(query, prior.value, prior.confidence),
        )
    }

    pub fn sampler(&self) -> ScriptedSampler {
        self.samples
            .iter()
            .fold(ScriptedSampler::new(), |sampler, (query, values)| {
                sampler.samples_for(query, values.clone())
            })
    }

    pub fn benchmark_source(&self) -> ScriptedBenchmarks {
        self.benchmarks
            .iter()
            .fold(ScriptedBenchmarks::new(), |source, (query, candidates)| {
                source.candidates_for(query, candidates.clone())
            })
    }
}
