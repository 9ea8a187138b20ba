use fermi_core::models::{EstimationResult, StrategyKind};
use fermi_core::traits::EvidenceProvider;
use fermi_core::EstimationError;

use crate::strategy::{Strategy, StrategyRequest};

/// A cascade layer backed by an injected [`EvidenceProvider`].
///
/// Installed as the generative-prior layer by default; any layer may be
/// backed by a provider this way.
pub struct ProviderStrategy {
    kind: StrategyKind,
    provider: Box<dyn EvidenceProvider>,
}

impl ProviderStrategy {
    pub fn new(kind: StrategyKind, provider: Box<dyn EvidenceProvider>) -> Self {
        Self { kind, provider }
    }
}

impl Strategy for ProviderStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let found = self.provider.lookup(request.query)?;
        Ok(found.map(|mut result| {
            result.source_strategy = Some(self.kind);
            if result.reasoning_trace.is_empty() {
                result
                    .reasoning_trace
                    .push(format!("answered by {}", self.provider.name()));
            }
            result
        }))
    }
}
