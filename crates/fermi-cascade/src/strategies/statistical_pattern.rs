use fermi_core::models::{EstimationResult, StrategyKind};
use fermi_core::EstimationError;

use super::{is_ratio_query, mentions_any, words};
use crate::strategy::{Strategy, StrategyRequest};

const SEGMENT_WORDS: &[&str] = &["top", "major", "leading", "largest", "biggest"];

/// Share of a population held by its head under the Pareto rule.
pub const PARETO_SHARE: f64 = 0.2;
const PARETO_CONFIDENCE: f64 = 0.6;

/// Pareto rule for "what share is the top segment" questions.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticalPatternStrategy;

impl Strategy for StatisticalPatternStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::StatisticalPattern
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let text = request.query.text();
        if !(is_ratio_query(text) && mentions_any(&words(text), SEGMENT_WORDS)) {
            return Ok(None);
        }
        Ok(Some(
            EstimationResult::point(
                StrategyKind::StatisticalPattern,
                PARETO_SHARE,
                PARETO_CONFIDENCE,
            )
            .with_trace("ratio of a head segment: Pareto 80/20 rule gives 0.2"),
        ))
    }
}
