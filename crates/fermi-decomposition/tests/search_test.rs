//! Decomposition search against a scripted engine.

use std::cell::RefCell;
use std::collections::BTreeMap;

use fermi_core::config::DecompositionConfig;
use fermi_core::models::{Context, DecompositionModel, EstimationResult, Query, StrategyKind};
use fermi_core::traits::Estimator;
use fermi_core::{CancellationToken, RequestScope};
use fermi_decomposition::DecompositionSearch;
use test_fixtures::ScriptedProposer;

/// Answers sub-queries from a fixed table; no estimate for anything else.
#[derive(Default)]
struct TableEngine {
    points: BTreeMap<String, (f64, f64)>,
    ranges: BTreeMap<String, (f64, f64)>,
}

impl TableEngine {
    fn point(mut self, query: &str, value: f64, confidence: f64) -> Self {
        self.points.insert(query.to_string(), (value, confidence));
        self
    }

    fn range(mut self, query: &str, low: f64, high: f64) -> Self {
        self.ranges.insert(query.to_string(), (low, high));
        self
    }
}

impl Estimator for TableEngine {
    fn estimate_in_scope(
        &self,
        query: &Query,
        _depth: usize,
        _scope: &RequestScope,
    ) -> EstimationResult {
        if let Some((value, confidence)) = self.points.get(&query.key()) {
            return EstimationResult::point(StrategyKind::GenerativePrior, *value, *confidence);
        }
        if let Some((low, high)) = self.ranges.get(&query.key()) {
            return EstimationResult::range(StrategyKind::BoundaryConstraint, *low, *high, 0.5);
        }
        EstimationResult::no_estimate(vec!["table has no entry".to_string()])
    }
}

fn facts(pairs: &[(&str, f64)]) -> Context {
    pairs
        .iter()
        .fold(Context::new(), |ctx, (k, v)| ctx.with_fact(k, *v))
}

fn search(proposer: ScriptedProposer) -> DecompositionSearch {
    DecompositionSearch::new(DecompositionConfig::default(), Box::new(proposer))
}

#[test]
fn fully_cached_model_beats_partially_defaulted_one() {
    let context = facts(&[("a", 2.0), ("b", 3.0), ("c", 5.0), ("d", 7.0), ("e", 11.0)]);
    let query = Query::with_context("target", context);
    let proposer = ScriptedProposer::new()
        .with_formula("target", "B", "a * b * c * x_adoption * y_penetration")
        .with_formula("target", "A", "a * b * c * d * e");
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    let result = outcome.result.unwrap();
    assert_eq!(result.value, Some(2310.0));
    assert_eq!(result.confidence.value(), 1.0);
    assert!(result
        .reasoning_trace
        .iter()
        .any(|l| l.starts_with("selected model A")));
    assert!(result
        .reasoning_trace
        .iter()
        .any(|l| l.contains("x_adoption: heuristic default 0.2")));
}

#[test]
fn infeasible_model_is_discarded() {
    let query = Query::with_context("target", facts(&[("a", 4.0)]));
    let proposer = ScriptedProposer::new()
        .with_formula("target", "mystery", "a * mystery_factor")
        .with_formula("target", "plain", "a * 2");
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert_eq!(outcome.result.unwrap().value, Some(8.0));
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.starts_with("[INFEASIBLE_MODEL]") && l.contains("mystery_factor")));
}

#[test]
fn execution_falls_back_to_the_next_model() {
    let query = Query::with_context(
        "target",
        facts(&[("a", 6.0), ("z", 0.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)]),
    );
    let proposer = ScriptedProposer::new()
        .with_formula("target", "ratio", "a / z")
        .with_formula("target", "product", "a * b * c * d");
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert_eq!(outcome.result.unwrap().value, Some(6.0));
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.starts_with("model ratio failed to execute")));
}

#[test]
fn too_many_variables_is_infeasible() {
    let names: Vec<String> = (0..11).map(|i| format!("v{i}")).collect();
    let context = names.iter().fold(Context::new(), |ctx, n| ctx.with_fact(n, 1.0));
    let query = Query::with_context("target", context);
    let proposer =
        ScriptedProposer::new().with_formula("target", "wide", &names.join(" * "));
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert!(outcome.result.is_none());
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.contains("exceeds the maximum of 10")));
    assert_eq!(
        outcome.trace.last().map(String::as_str),
        Some("no feasible decomposition model")
    );
}

#[test]
fn above_recommended_count_is_kept_with_a_warning() {
    let names: Vec<String> = (0..7).map(|i| format!("v{i}")).collect();
    let context = names.iter().fold(Context::new(), |ctx, n| ctx.with_fact(n, 2.0));
    let query = Query::with_context("target", context);
    let proposer =
        ScriptedProposer::new().with_formula("target", "wide", &names.join(" * "));
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert_eq!(outcome.result.unwrap().value, Some(128.0));
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.contains("above the recommended 6")));
}

#[test]
fn candidates_are_capped() {
    let query = Query::with_context("target", facts(&[("a", 1.0)]));
    let models: Vec<DecompositionModel> = (0..7)
        .map(|i| DecompositionModel::new(format!("m{i}"), format!("a * {i}"), ""))
        .collect();
    let proposer = ScriptedProposer::new().with_models("target", models);
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert!(outcome
        .trace
        .iter()
        .any(|l| l == "7 models proposed, evaluating the first 5"));
    assert!(!outcome.trace.iter().any(|l| l.starts_with("model m5")));
}

#[test]
fn proposer_failure_ends_the_search() {
    let scope = RequestScope::new(4);
    let outcome = search(ScriptedProposer::failing()).search(
        &Query::new("target"),
        0,
        &scope,
        &TableEngine::default(),
    );
    assert!(outcome.result.is_none());
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.starts_with("[PROPOSER_ERROR]")));
}

#[test]
fn unsupported_syntax_is_rejected() {
    let query = Query::with_context("target", facts(&[("a", 2.0)]));
    let proposer = ScriptedProposer::new().with_formula("target", "power", "a ** 2");
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert!(outcome.result.is_none());
    assert!(outcome.trace.iter().any(|l| l.contains("formula rejected")));
}

#[test]
fn sub_variables_are_estimated_recursively() {
    let query = Query::with_context("revenue", facts(&[("customers", 100.0)]));
    let proposer = ScriptedProposer::new().with_formula("revenue", "m", "customers * spend");
    let engine = TableEngine::default().point("spend", 40.0, 0.64);
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &engine);

    let result = outcome.result.unwrap();
    assert_eq!(result.value, Some(4000.0));
    assert!((result.confidence.value() - 0.8).abs() < 1e-9);
    let spend = result
        .evidence_used
        .iter()
        .find(|e| e.source == "spend")
        .unwrap();
    assert_eq!(spend.note.as_deref(), Some("recursive at depth 1"));
    assert_eq!(scope.guard.depth(), 0);
    assert_eq!(scope.guard.peak(), 1);
}

#[test]
fn range_only_sub_estimate_uses_the_heuristic_default() {
    let query = Query::with_context("users", facts(&[("population", 1000.0)]));
    let proposer =
        ScriptedProposer::new().with_formula("users", "m", "population * adoption_rate");
    let engine = TableEngine::default().range("adoption_rate", 0.0, 1.0);
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &engine);

    let result = outcome.result.unwrap();
    assert!((result.value.unwrap() - 200.0).abs() < 1e-9);
    let adoption = result
        .evidence_used
        .iter()
        .find(|e| e.source == "adoption_rate")
        .unwrap();
    assert_eq!(adoption.reliability.value(), 0.35);
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.contains("sub-estimate gave no point value ([0, 1])")));
}

#[test]
fn depth_bound_forces_defaults() {
    let query = Query::with_context("users", facts(&[("population", 1000.0)]));
    let proposer =
        ScriptedProposer::new().with_formula("users", "m", "population * adoption_rate");
    let engine = TableEngine::default().point("adoption_rate", 0.5, 0.9);
    let scope = RequestScope::new(1);

    let outcome = search(proposer).search(&query, 0, &scope, &engine);

    let result = outcome.result.unwrap();
    assert!((result.value.unwrap() - 200.0).abs() < 1e-9);
    assert_eq!(scope.guard.peak(), 0);
    assert!(outcome.trace.iter().any(|l| l.contains("[DEPTH_EXCEEDED]")));
}

#[test]
fn deeply_nested_formula_is_rejected_not_evaluated() {
    let query = Query::with_context("target", facts(&[("a", 2.0)]));
    let deep = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
    let proposer = ScriptedProposer::new()
        .with_formula("target", "deep", &deep)
        .with_formula("target", "flat", "a * 3");
    let scope = RequestScope::new(4);

    let outcome = search(proposer).search(&query, 0, &scope, &TableEngine::default());

    assert_eq!(outcome.result.unwrap().value, Some(6.0));
    assert!(outcome
        .trace
        .iter()
        .any(|l| l.starts_with("[INFEASIBLE_MODEL]") && l.contains("formula rejected")));
}

/// Cancels the request the first time it is asked anything.
struct CancelOnFirstCall {
    token: CancellationToken,
    asked: RefCell<Vec<String>>,
}

impl Estimator for CancelOnFirstCall {
    fn estimate_in_scope(
        &self,
        query: &Query,
        _depth: usize,
        _scope: &RequestScope,
    ) -> EstimationResult {
        self.asked.borrow_mut().push(query.key());
        self.token.cancel();
        EstimationResult::no_estimate(vec!["stopped".to_string()])
    }
}

#[test]
fn cancellation_during_resolution_stops_the_search() {
    let token = CancellationToken::new();
    let engine = CancelOnFirstCall {
        token: token.clone(),
        asked: RefCell::new(Vec::new()),
    };
    let proposer = ScriptedProposer::new()
        .with_formula("target", "first", "alpha * beta * gamma")
        .with_formula("target", "second", "delta * epsilon");
    let scope = RequestScope::with_cancellation(4, token);

    let outcome = search(proposer).search(&Query::new("target"), 0, &scope, &engine);

    assert!(outcome.result.is_none());
    assert_eq!(
        outcome.trace.last().map(String::as_str),
        Some("[CANCELLED] estimation cancelled")
    );
    assert_eq!(engine.asked.borrow().len(), 1);
    assert_eq!(scope.guard.depth(), 0);
}

#[test]
fn cancelled_request_never_descends() {
    let token = CancellationToken::new();
    token.cancel();
    let engine = CancelOnFirstCall {
        token: token.clone(),
        asked: RefCell::new(Vec::new()),
    };
    let query = Query::with_context("target", facts(&[("a", 2.0)]));
    let proposer = ScriptedProposer::new().with_formula("target", "m", "a * unknown_share");
    let scope = RequestScope::with_cancellation(4, token);

    let outcome = search(proposer).search(&query, 0, &scope, &engine);

    assert!(outcome.result.is_none());
    assert!(outcome.trace.iter().any(|l| l == "  a: cached 2"));
    assert!(outcome.trace.iter().any(|l| l.starts_with("[CANCELLED]")));
    assert!(engine.asked.borrow().is_empty());
}
