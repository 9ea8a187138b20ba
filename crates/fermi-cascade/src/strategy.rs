use fermi_core::models::{EstimationResult, Query, StrategyKind};
use fermi_core::traits::Estimator;
use fermi_core::{EstimationError, FermiConfig, RequestScope};

/// Everything a strategy may read during one attempt.
pub struct StrategyRequest<'a> {
    pub query: &'a Query,
    pub depth: usize,
    pub scope: &'a RequestScope,
    /// The controller itself, for strategies that recurse.
    pub engine: &'a dyn Estimator,
    pub config: &'a FermiConfig,
}

/// One cascade layer.
///
/// `Ok(None)` means the layer has nothing to say. A result without a value or
/// range is a failed attempt whose trace is still worth keeping. `Err` is
/// recovered by the controller and recorded as a strategy failure.
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError>;
}
