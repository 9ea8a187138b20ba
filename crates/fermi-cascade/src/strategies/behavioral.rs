use fermi_core::constants::ANCHOR_FACT;
use fermi_core::models::{EstimationResult, EvidenceItem, StrategyKind};
use fermi_core::{Confidence, EstimationError};

use super::{mentions_any, words};
use crate::strategy::{Strategy, StrategyRequest};

/// Losses weigh about twice as much as equivalent gains.
pub const LOSS_AVERSION_FACTOR: f64 = 2.0;

pub const LOSS_WORDS: &[&str] = &[
    "churn", "cancel", "cancels", "cancellation", "switch", "switching", "loss", "lose", "quit",
];

const BEHAVIORAL_CONFIDENCE: f64 = 0.7;

/// Scales a numeric `anchor` fact for loss-framed questions.
#[derive(Debug, Default, Clone, Copy)]
pub struct BehavioralStrategy;

impl Strategy for BehavioralStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Behavioral
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        if !mentions_any(&words(request.query.text()), LOSS_WORDS) {
            return Ok(None);
        }
        let Some(anchor) = request.query.context().number(ANCHOR_FACT) else {
            return Ok(None);
        };
        let value = anchor / LOSS_AVERSION_FACTOR;
        Ok(Some(
            EstimationResult::point(StrategyKind::Behavioral, value, BEHAVIORAL_CONFIDENCE)
                .with_trace(format!(
                    "loss-framed query: anchor {anchor} / loss aversion \
                     {LOSS_AVERSION_FACTOR} = {value}"
                ))
                .with_evidence(EvidenceItem::number(ANCHOR_FACT, anchor, Confidence::CERTAIN)),
        ))
    }
}
