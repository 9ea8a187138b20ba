//! Evidence cascade controller.
//!
//! Runs the configured strategies in cascade order and accepts the first
//! result whose confidence meets that strategy's threshold. Failures,
//! panics and below-threshold results are recorded and the cascade moves on.
//! Nothing escapes: the worst case is an explicit no-estimate result.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use fermi_core::models::{EstimationResult, Query, StrategyKind};
use fermi_core::traits::{
    BenchmarkProvider, Estimator, EvidenceProvider, ModelProposer, SampleProvider,
};
use fermi_core::{CancellationToken, EstimationError, FermiConfig, FermiErrorCode, RequestScope};
use fermi_decomposition::DecompositionSearch;
use tracing::{debug, info, warn};

use crate::strategies::{
    AnalogyStrategy, BehavioralStrategy, BoundaryStrategy, ConsensusStrategy,
    DecompositionStrategy, ExactCacheStrategy, LawLookupStrategy, ProviderStrategy,
    StatisticalPatternStrategy,
};
use crate::strategy::{Strategy, StrategyRequest};

pub struct CascadeController {
    config: FermiConfig,
    strategies: Vec<Box<dyn Strategy>>,
}

impl CascadeController {
    pub fn builder(config: FermiConfig) -> CascadeBuilder {
        CascadeBuilder::new(config)
    }

    /// Controller with only the deterministic layers installed.
    pub fn with_defaults(config: FermiConfig) -> Self {
        CascadeBuilder::new(config).build()
    }

    pub fn config(&self) -> &FermiConfig {
        &self.config
    }

    /// Installed strategies in cascade order.
    pub fn strategy_kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Estimate a top-level query in a fresh request scope.
    pub fn estimate(&self, query: &Query) -> EstimationResult {
        let scope = RequestScope::new(self.config.decomposition.max_depth);
        self.estimate_in(query, &scope)
    }

    /// Like [`estimate`](Self::estimate), stopping cooperatively once `token` is cancelled.
    pub fn estimate_with_cancellation(
        &self,
        query: &Query,
        token: CancellationToken,
    ) -> EstimationResult {
        let scope = RequestScope::with_cancellation(self.config.decomposition.max_depth, token);
        self.estimate_in(query, &scope)
    }

    /// Estimate a top-level query inside a caller-owned scope.
    ///
    /// The scope must be fresh; its guard is inspectable afterwards.
    pub fn estimate_in(&self, query: &Query, scope: &RequestScope) -> EstimationResult {
        let key = query.key();
        let _entry = match scope.guard.enter(&key) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(query = query.text(), "top-level query already in flight");
                return EstimationResult::no_estimate(vec![err.trace_line()]);
            }
        };
        let result = self.estimate_in_scope(query, 0, scope);
        info!(
            query = query.text(),
            value = %result.describe_value(),
            confidence = result.confidence.value(),
            strategy = result.source_strategy.map_or("none", |s| s.config_key()),
            "estimate complete"
        );
        result
    }

    fn attempt(
        &self,
        strategy: &dyn Strategy,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        catch_unwind(AssertUnwindSafe(|| strategy.attempt(request))).unwrap_or_else(|panic| {
            Err(EstimationError::StrategyFailure {
                strategy: strategy.kind().to_string(),
                reason: format!("panicked: {}", panic_message(panic.as_ref())),
            })
        })
    }
}

impl Estimator for CascadeController {
    fn estimate_in_scope(
        &self,
        query: &Query,
        depth: usize,
        scope: &RequestScope,
    ) -> EstimationResult {
        let _span = fermi_core::estimate_span!(query.text(), depth).entered();
        let mut trace = vec![format!("estimate \"{}\" at depth {depth}", query.text())];
        let mut rejected = Vec::new();

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let settings = self.config.cascade.strategy(kind);
            if !settings.enabled {
                continue;
            }
            if scope.is_cancelled() {
                trace.push(EstimationError::Cancelled.trace_line());
                let mut cancelled = EstimationResult::no_estimate(trace);
                cancelled.evidence_rejected = rejected;
                return cancelled;
            }

            let request = StrategyRequest {
                query,
                depth,
                scope,
                engine: self,
                config: &self.config,
            };
            match self.attempt(strategy.as_ref(), &request) {
                Err(err) => {
                    warn!(
                        strategy = %kind,
                        code = err.error_code(),
                        reason = %err,
                        "strategy failed"
                    );
                    let err = match err {
                        EstimationError::StrategyFailure { .. } => err,
                        other => EstimationError::StrategyFailure {
                            strategy: kind.to_string(),
                            reason: other.to_string(),
                        },
                    };
                    trace.push(err.trace_line());
                }
                Ok(None) => trace.push(format!("{kind}: not applicable")),
                Ok(Some(result)) if result.is_no_estimate() => {
                    trace.push(format!("{kind}: no estimate"));
                    trace.extend(result.reasoning_trace.into_iter().map(|l| format!("  {l}")));
                    rejected.extend(result.evidence_rejected);
                }
                Ok(Some(mut result)) if result.confidence.meets(settings.threshold) => {
                    debug!(
                        strategy = %kind,
                        confidence = result.confidence.value(),
                        "strategy accepted"
                    );
                    trace.push(format!(
                        "{kind}: accepted {} (confidence {} >= {})",
                        result.describe_value(),
                        result.confidence,
                        settings.threshold
                    ));
                    trace.extend(result.reasoning_trace.drain(..).map(|l| format!("  {l}")));
                    result.source_strategy = Some(kind);
                    result.reasoning_trace = trace;
                    rejected.append(&mut result.evidence_rejected);
                    result.evidence_rejected = rejected;
                    return result;
                }
                Ok(Some(result)) => {
                    debug!(
                        strategy = %kind,
                        confidence = result.confidence.value(),
                        "below threshold"
                    );
                    trace.push(format!(
                        "{kind}: rejected {} (confidence {} < {})",
                        result.describe_value(),
                        result.confidence,
                        settings.threshold
                    ));
                    trace.extend(result.reasoning_trace.iter().map(|l| format!("  {l}")));
                    rejected.push(
                        result
                            .as_evidence()
                            .with_note(format!("below {kind} threshold {}", settings.threshold)),
                    );
                    rejected.extend(result.evidence_rejected);
                }
            }
        }

        let err = EstimationError::NoEstimatePossible {
            query: query.text().to_string(),
        };
        debug!(query = query.text(), depth, "cascade exhausted");
        trace.push(err.trace_line());
        let mut none = EstimationResult::no_estimate(trace);
        none.evidence_rejected = rejected;
        none
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Assembles a [`CascadeController`] from a config and the injected collaborators.
///
/// Layers whose collaborator is missing are left out. A strategy added with
/// [`with_strategy`](Self::with_strategy) replaces the built-in layer of the
/// same kind.
pub struct CascadeBuilder {
    config: FermiConfig,
    generative_prior: Option<Box<dyn EvidenceProvider>>,
    samples: Option<Box<dyn SampleProvider>>,
    benchmarks: Option<Box<dyn BenchmarkProvider>>,
    proposer: Option<Box<dyn ModelProposer>>,
    custom: Vec<Box<dyn Strategy>>,
}

impl CascadeBuilder {
    pub fn new(config: FermiConfig) -> Self {
        Self {
            config,
            generative_prior: None,
            samples: None,
            benchmarks: None,
            proposer: None,
            custom: Vec::new(),
        }
    }

    pub fn with_generative_prior(mut self, provider: Box<dyn EvidenceProvider>) -> Self {
        self.generative_prior = Some(provider);
        self
    }

    pub fn with_sample_provider(mut self, provider: Box<dyn SampleProvider>) -> Self {
        self.samples = Some(provider);
        self
    }

    pub fn with_benchmark_provider(mut self, provider: Box<dyn BenchmarkProvider>) -> Self {
        self.benchmarks = Some(provider);
        self
    }

    pub fn with_model_proposer(mut self, proposer: Box<dyn ModelProposer>) -> Self {
        self.proposer = Some(proposer);
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.custom.push(strategy);
        self
    }

    pub fn build(mut self) -> CascadeController {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
        for kind in StrategyKind::CASCADE_ORDER {
            let (custom, rest): (Vec<_>, Vec<_>) =
                self.custom.into_iter().partition(|s| s.kind() == kind);
            self.custom = rest;
            if !custom.is_empty() {
                strategies.extend(custom);
                continue;
            }
            if let Some(builtin) = self.builtin(kind) {
                strategies.push(builtin);
            }
        }
        debug!(
            layers = ?strategies.iter().map(|s| s.kind().config_key()).collect::<Vec<_>>(),
            "cascade assembled"
        );
        CascadeController {
            config: self.config,
            strategies,
        }
    }

    fn builtin(&mut self, kind: StrategyKind) -> Option<Box<dyn Strategy>> {
        match kind {
            StrategyKind::ExactCache => Some(Box::new(ExactCacheStrategy)),
            StrategyKind::GenerativePrior => self
                .generative_prior
                .take()
                .map(|p| Box::new(ProviderStrategy::new(kind, p)) as Box<dyn Strategy>),
            StrategyKind::ExternalConsensus => self
                .samples
                .take()
                .map(|p| Box::new(ConsensusStrategy::new(p)) as Box<dyn Strategy>),
            StrategyKind::LawLookup => Some(Box::new(LawLookupStrategy)),
            StrategyKind::Behavioral => Some(Box::new(BehavioralStrategy)),
            StrategyKind::StatisticalPattern => Some(Box::new(StatisticalPatternStrategy)),
            StrategyKind::AnalogyBenchmark => self
                .benchmarks
                .take()
                .map(|p| Box::new(AnalogyStrategy::new(p)) as Box<dyn Strategy>),
            StrategyKind::Decomposition => self.proposer.take().map(|proposer| {
                let search = DecompositionSearch::new(self.config.decomposition.clone(), proposer)
                    .with_known_facts(self.config.cascade.known_facts.clone());
                Box::new(DecompositionStrategy::new(search)) as Box<dyn Strategy>
            }),
            StrategyKind::BoundaryConstraint => Some(Box::new(BoundaryStrategy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fermi_core::models::Context;

    struct Fixed(StrategyKind, f64, f64);

    impl Strategy for Fixed {
        fn kind(&self) -> StrategyKind {
            self.0
        }

        fn attempt(
            &self,
            _request: &StrategyRequest<'_>,
        ) -> Result<Option<EstimationResult>, EstimationError> {
            Ok(Some(EstimationResult::point(self.0, self.1, self.2)))
        }
    }

    struct Exploding;

    impl Strategy for Exploding {
        fn kind(&self) -> StrategyKind {
            StrategyKind::ExactCache
        }

        fn attempt(
            &self,
            _request: &StrategyRequest<'_>,
        ) -> Result<Option<EstimationResult>, EstimationError> {
            panic!("boom")
        }
    }

    #[test]
    fn deterministic_layers_are_always_installed() {
        let controller = CascadeController::with_defaults(FermiConfig::default());
        assert_eq!(
            controller.strategy_kinds(),
            vec![
                StrategyKind::ExactCache,
                StrategyKind::LawLookup,
                StrategyKind::Behavioral,
                StrategyKind::StatisticalPattern,
                StrategyKind::BoundaryConstraint,
            ]
        );
    }

    #[test]
    fn custom_strategy_replaces_builtin_in_place() {
        let controller = CascadeController::builder(FermiConfig::default())
            .with_strategy(Box::new(Fixed(StrategyKind::Behavioral, 1.0, 0.9)))
            .build();
        let kinds = controller.strategy_kinds();
        let behavioral = kinds
            .iter()
            .filter(|k| **k == StrategyKind::Behavioral)
            .count();
        assert_eq!(behavioral, 1);
        assert_eq!(kinds[2], StrategyKind::Behavioral);
    }

    #[test]
    fn below_threshold_result_is_kept_as_rejected_evidence() {
        let controller = CascadeController::builder(FermiConfig::default())
            .with_strategy(Box::new(Fixed(StrategyKind::StatisticalPattern, 7.0, 0.4)))
            .with_strategy(Box::new(Fixed(StrategyKind::BoundaryConstraint, 3.0, 0.1)))
            .build();
        let result = controller.estimate(&Query::new("anything"));
        assert_eq!(result.value, Some(3.0));
        assert_eq!(result.source_strategy, Some(StrategyKind::BoundaryConstraint));
        assert_eq!(result.evidence_rejected.len(), 1);
        assert_eq!(result.evidence_rejected[0].source, "statistical_pattern");
        assert!(result
            .reasoning_trace
            .iter()
            .any(|l| l.starts_with("statistical_pattern: rejected 7")));
    }

    #[test]
    fn panicking_strategy_is_contained() {
        let controller = CascadeController::builder(FermiConfig::default())
            .with_strategy(Box::new(Exploding))
            .build();
        let query = Query::with_context("hours in a day", Context::new());
        let result = controller.estimate(&query);
        assert_eq!(result.value, Some(24.0));
        assert!(result
            .reasoning_trace
            .iter()
            .any(|l| l.starts_with("[STRATEGY_FAILURE]") && l.contains("boom")));
    }

    #[test]
    fn exhausted_cascade_is_explicit() {
        let controller = CascadeController::with_defaults(FermiConfig::default());
        let result = controller.estimate(&Query::new("number of piano tuners in Chicago"));
        assert!(result.is_no_estimate());
        assert_eq!(result.confidence.value(), 0.0);
        assert_eq!(result.source_strategy, None);
        assert!(result
            .reasoning_trace
            .last()
            .is_some_and(|l| l.starts_with("[NO_ESTIMATE_POSSIBLE]")));
    }

    #[test]
    fn panic_message_extracts_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("static");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(static_payload.as_ref()), "static");
        assert_eq!(panic_message(owned_payload.as_ref()), "owned");
    }
}
