use fermi_core::models::{normalize_key, EstimationResult, EvidenceItem, StrategyKind};
use fermi_core::{Confidence, EstimationError};

use crate::strategy::{Strategy, StrategyRequest};

/// Answers a query whose key is a known numeric fact, from the query context
/// first and the configured known facts second.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactCacheStrategy;

impl Strategy for ExactCacheStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ExactCache
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let key = request.query.key();
        let hit = request
            .query
            .context()
            .number(&key)
            .map(|v| ("context", v))
            .or_else(|| {
                request
                    .config
                    .cascade
                    .known_facts
                    .iter()
                    .find(|(k, v)| normalize_key(k) == key && v.is_finite())
                    .map(|(_, v)| ("known_facts", *v))
            });

        Ok(hit.map(|(source, value)| {
            EstimationResult::point(StrategyKind::ExactCache, value, Confidence::CERTAIN)
                .with_trace(format!("{source} holds \"{key}\" = {value}"))
                .with_evidence(EvidenceItem::number(source, value, Confidence::CERTAIN))
        }))
    }
}
