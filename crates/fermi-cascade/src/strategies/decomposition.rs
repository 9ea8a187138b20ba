use fermi_core::models::{EstimationResult, StrategyKind};
use fermi_core::EstimationError;
use fermi_decomposition::DecompositionSearch;

use crate::strategy::{Strategy, StrategyRequest};

/// Fermi decomposition as a cascade layer; recurses through `request.engine`.
pub struct DecompositionStrategy {
    search: DecompositionSearch,
}

impl DecompositionStrategy {
    pub fn new(search: DecompositionSearch) -> Self {
        Self { search }
    }
}

impl Strategy for DecompositionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Decomposition
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let outcome = self
            .search
            .search(request.query, request.depth, request.scope, request.engine);
        Ok(Some(outcome.result.unwrap_or_else(|| {
            let mut failed = EstimationResult::no_estimate(outcome.trace);
            failed.source_strategy = Some(StrategyKind::Decomposition);
            failed
        })))
    }
}
