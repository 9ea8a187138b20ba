//! Decomposition search: propose, resolve, score, execute.

use std::collections::BTreeMap;

use fermi_confidence::fuse;
use fermi_core::config::DecompositionConfig;
use fermi_core::models::{
    DecompositionModel, EstimationResult, EvidenceItem, Query, SourceKind, StrategyKind,
};
use fermi_core::traits::{Estimator, ModelProposer};
use fermi_core::{Confidence, EstimationError, FermiErrorCode, RequestScope};
use tracing::{debug, info, warn};

use crate::expression::Expression;
use crate::policy::{check_variable_count, PolicyVerdict};
use crate::resolver::Resolver;
use crate::scoring::{compare, score_model, ModelScore};

/// Result of one search: an estimate if any model executed, and the trace either way.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub result: Option<EstimationResult>,
    pub trace: Vec<String>,
}

impl SearchOutcome {
    fn failed(trace: Vec<String>) -> Self {
        Self {
            result: None,
            trace,
        }
    }
}

/// A resolved, scored candidate.
#[derive(Debug, Clone)]
pub struct ScoredModel {
    pub model: DecompositionModel,
    pub expression: Expression,
    pub score: ModelScore,
}

pub struct DecompositionSearch {
    config: DecompositionConfig,
    proposer: Box<dyn ModelProposer>,
    known_facts: BTreeMap<String, f64>,
}

impl DecompositionSearch {
    pub fn new(config: DecompositionConfig, proposer: Box<dyn ModelProposer>) -> Self {
        Self {
            config,
            proposer,
            known_facts: BTreeMap::new(),
        }
    }

    /// Facts treated as cached, in addition to each query's context.
    pub fn with_known_facts(mut self, known_facts: BTreeMap<String, f64>) -> Self {
        self.known_facts = known_facts;
        self
    }

    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Run the search for `query` at `depth`, resolving sub-variables through `engine`.
    pub fn search(
        &self,
        query: &Query,
        depth: usize,
        scope: &RequestScope,
        engine: &dyn Estimator,
    ) -> SearchOutcome {
        let _span = fermi_core::decomposition_span!(query.text(), depth).entered();
        let mut trace = Vec::new();

        let mut known = self.known_facts.clone();
        known.extend(query.context().numeric_facts());

        let mut proposals = match self.proposer.propose(query, &known) {
            Ok(models) => models,
            Err(err) => {
                let err = EstimationError::from(err);
                warn!(query = query.text(), code = err.error_code(), "model proposer failed");
                trace.push(err.trace_line());
                return SearchOutcome::failed(trace);
            }
        };
        if proposals.is_empty() {
            trace.push("no decomposition models proposed".to_string());
            return SearchOutcome::failed(trace);
        }
        if proposals.len() > self.config.max_candidates {
            trace.push(format!(
                "{} models proposed, evaluating the first {}",
                proposals.len(),
                self.config.max_candidates
            ));
            proposals.truncate(self.config.max_candidates);
        } else if proposals.len() < 3 {
            trace.push(format!("only {} candidate model(s) proposed", proposals.len()));
        }

        let resolver = Resolver {
            config: &self.config,
            known_facts: &self.known_facts,
            engine,
            scope,
            query,
            depth,
        };

        let mut feasible = Vec::new();
        for model in proposals {
            match self.evaluate_candidate(model, &resolver, &mut trace) {
                Ok(scored) => feasible.push(scored),
                Err(EstimationError::Cancelled) => {
                    trace.push(EstimationError::Cancelled.trace_line());
                    return SearchOutcome::failed(trace);
                }
                Err(err) => {
                    debug!(query = query.text(), reason = %err, "model discarded");
                    trace.push(err.trace_line());
                }
            }
        }

        if feasible.is_empty() {
            trace.push("no feasible decomposition model".to_string());
            return SearchOutcome::failed(trace);
        }

        // Stable sort keeps proposal order among exact ties.
        feasible.sort_by(|a, b| compare(&a.score, &b.score));

        for candidate in &feasible {
            let values: BTreeMap<String, f64> = candidate
                .model
                .variables
                .iter()
                .filter_map(|v| v.value.map(|value| (v.name.clone(), value)))
                .collect();
            match candidate.expression.evaluate(&values) {
                Ok(value) => {
                    info!(
                        query = query.text(),
                        model = %candidate.model.id,
                        score = candidate.score.total,
                        value,
                        "decomposition model selected"
                    );
                    trace.push(format!(
                        "selected model {} ({}) = {value}",
                        candidate.model.id, candidate.model.formula
                    ));
                    let result = build_result(candidate, value, trace);
                    return SearchOutcome {
                        trace: result.reasoning_trace.clone(),
                        result: Some(result),
                    };
                }
                Err(err) => {
                    let err = EstimationError::from(err);
                    trace.push(format!(
                        "model {} failed to execute: {}",
                        candidate.model.id,
                        err.trace_line()
                    ));
                }
            }
        }

        trace.push("every feasible model failed to execute".to_string());
        SearchOutcome::failed(trace)
    }

    fn evaluate_candidate(
        &self,
        mut model: DecompositionModel,
        resolver: &Resolver<'_>,
        trace: &mut Vec<String>,
    ) -> Result<ScoredModel, EstimationError> {
        let expression = Expression::parse(&model.formula).map_err(|e| {
            EstimationError::InfeasibleModel {
                model_id: model.id.clone(),
                reason: format!("formula rejected: {e}"),
            }
        })?;
        for name in expression.variables() {
            model.declare(name.clone());
        }

        match check_variable_count(model.variables.len(), &self.config) {
            PolicyVerdict::Accept => {}
            PolicyVerdict::Warn(note) => {
                warn!(
                    model = %model.id,
                    variables = model.variables.len(),
                    "model above recommended variable count"
                );
                trace.push(format!("model {}: {note}", model.id));
            }
            PolicyVerdict::Reject(reason) => {
                return Err(EstimationError::InfeasibleModel {
                    model_id: model.id.clone(),
                    reason,
                });
            }
        }

        trace.push(format!("model {}: {}", model.id, model.formula));
        resolver.resolve_model(&mut model, trace)?;

        let score = score_model(&model, &self.config.weights).ok_or_else(|| {
            EstimationError::InfeasibleModel {
                model_id: model.id.clone(),
                reason: format!(
                    "unresolved variables: {}",
                    model.unresolved_names().join(", ")
                ),
            }
        })?;
        debug!(
            model = %model.id,
            score = score.total,
            defaults = score.defaults_used,
            "model scored"
        );
        trace.push(format!("model {}: {}", model.id, score.breakdown()));

        Ok(ScoredModel {
            model,
            expression,
            score,
        })
    }
}

fn build_result(candidate: &ScoredModel, value: f64, trace: Vec<String>) -> EstimationResult {
    let confidences: Vec<Confidence> = candidate
        .model
        .variables
        .iter()
        .map(|v| v.confidence)
        .collect();
    let mut result =
        EstimationResult::point(StrategyKind::Decomposition, value, fuse(&confidences));
    result.reasoning_trace = trace;
    for variable in &candidate.model.variables {
        let Some(var_value) = variable.value else {
            continue;
        };
        let kind = variable.source_kind.unwrap_or(SourceKind::HeuristicDefault);
        result.evidence_used.push(
            EvidenceItem::number(variable.name.clone(), var_value, variable.confidence)
                .with_note(format!("{} at depth {}", kind.name(), variable.depth)),
        );
    }
    result
}
