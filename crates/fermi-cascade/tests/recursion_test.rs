//! Depth and cycle bounds on recursive decomposition.

use fermi_cascade::CascadeController;
use fermi_core::models::{Query, StrategyKind};
use fermi_core::{FermiConfig, RequestScope};
use proptest::prelude::*;
use test_fixtures::{ChainProposer, ScriptedProposer};

fn config(max_depth: usize) -> FermiConfig {
    let mut config = FermiConfig::default();
    config.decomposition.max_depth = max_depth;
    config.decomposition.generic_default = Some(1.0);
    config
}

/// Shares one proposer between the controller and the test.
struct Shared<P>(std::sync::Arc<P>);

impl<P: fermi_core::ModelProposer> fermi_core::ModelProposer for Shared<P> {
    fn propose(
        &self,
        query: &Query,
        known: &std::collections::BTreeMap<String, f64>,
    ) -> Result<Vec<fermi_core::DecompositionModel>, fermi_core::errors::ProposerError> {
        self.0.propose(query, known)
    }
}

proptest! {
    #[test]
    fn chain_never_exceeds_max_depth(max_depth in 1usize..8, text in "[a-z]{1,8}") {
        let proposer = std::sync::Arc::new(ChainProposer::new());
        let controller = CascadeController::builder(config(max_depth))
            .with_model_proposer(Box::new(Shared(proposer.clone())))
            .build();

        let scope = RequestScope::new(max_depth);
        let result = controller.estimate_in(&Query::new(text), &scope);

        prop_assert!(scope.guard.peak() <= max_depth);
        prop_assert!(proposer.call_count() <= max_depth);
        prop_assert_eq!(scope.guard.depth(), 0);
        prop_assert!(result.has_estimate());
    }
}

#[test]
fn chain_bottoms_out_on_the_heuristic_default() {
    let proposer = std::sync::Arc::new(ChainProposer::new());
    let controller = CascadeController::builder(config(3))
        .with_model_proposer(Box::new(Shared(proposer.clone())))
        .build();
    let scope = RequestScope::new(3);
    let result = controller.estimate_in(&Query::new("metric"), &scope);

    // metric -> metric_next -> metric_next_next, which is defaulted to 1.
    assert_eq!(result.value, Some(8.0));
    assert_eq!(result.source_strategy, Some(StrategyKind::Decomposition));
    assert_eq!(proposer.call_count(), 3);
    assert_eq!(scope.guard.peak(), 3);
    assert!(result
        .reasoning_trace
        .iter()
        .any(|l| l.contains("[DEPTH_EXCEEDED]")));
}

#[test]
fn mutual_recursion_terminates_with_low_confidence() {
    let proposer = std::sync::Arc::new(
        ScriptedProposer::new()
            .with_formula("revenue", "by_users", "users * 3")
            .with_formula("users", "by_revenue", "revenue / 3"),
    );
    let controller = CascadeController::builder(config(4))
        .with_model_proposer(Box::new(Shared(proposer.clone())))
        .build();

    let result = controller.estimate(&Query::new("revenue"));

    assert_eq!(proposer.calls(), vec!["revenue".to_string(), "users".to_string()]);
    let value = result.value.unwrap();
    assert!((value - 1.0).abs() < 1e-9);
    assert!(result.confidence.value() <= 0.4);
    assert!(result
        .reasoning_trace
        .iter()
        .any(|l| l.contains("[CYCLE_DETECTED]")));
}

#[test]
fn self_reference_without_defaults_is_no_estimate() {
    let proposer = ScriptedProposer::new().with_formula("revenue", "loop", "revenue * 2");
    let mut config = FermiConfig::default();
    config.decomposition.generic_default = None;
    let controller = CascadeController::builder(config)
        .with_model_proposer(Box::new(proposer))
        .build();

    let result = controller.estimate(&Query::new("revenue"));

    assert!(result.is_no_estimate());
    assert!(result
        .reasoning_trace
        .iter()
        .any(|l| l.contains("[INFEASIBLE_MODEL]")));
    assert!(result
        .reasoning_trace
        .last()
        .is_some_and(|l| l.starts_with("[NO_ESTIMATE_POSSIBLE]")));
}
