use fermi_core::models::{EstimationResult, StrategyKind};
use fermi_core::EstimationError;

use super::{is_ratio_query, mentions_any, words};
use crate::strategy::{Strategy, StrategyRequest};

/// A physical or logical range the answer cannot leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
    pub confidence: f64,
}

impl Bound {
    const fn new(name: &'static str, low: f64, high: f64, confidence: f64) -> Self {
        Self {
            name,
            low,
            high,
            confidence,
        }
    }
}

const REVISIT: Bound = Bound::new("revisit interval in days", 0.0, 90.0, 0.4);
const HOURS_IN_DAY: Bound = Bound::new("hours in a day", 0.0, 24.0, 0.5);
const DAYS_IN_WEEK: Bound = Bound::new("days in a week", 0.0, 7.0, 0.5);
const RATIO: Bound = Bound::new("ratio", 0.0, 1.0, 0.5);

/// Most specific bound first.
pub fn bound_for(text: &str) -> Option<Bound> {
    let words = words(text);
    if mentions_any(&words, &["revisit", "return", "returns", "repeat"])
        && mentions_any(&words, &["interval", "frequency", "days", "often"])
    {
        return Some(REVISIT);
    }
    if mentions_any(&words, &["hour", "hours"]) && mentions_any(&words, &["day", "daily"]) {
        return Some(HOURS_IN_DAY);
    }
    if mentions_any(&words, &["day", "days"]) && mentions_any(&words, &["week", "weekly"]) {
        return Some(DAYS_IN_WEEK);
    }
    if is_ratio_query(text) {
        return Some(RATIO);
    }
    None
}

/// Last-resort layer: a range instead of a point value.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundaryStrategy;

impl Strategy for BoundaryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundaryConstraint
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        Ok(bound_for(request.query.text()).map(|bound| {
            EstimationResult::range(
                StrategyKind::BoundaryConstraint,
                bound.low,
                bound.high,
                bound.confidence,
            )
            .with_trace(format!(
                "only bounded: {} lies in [{}, {}]",
                bound.name, bound.low, bound.high
            ))
        }))
    }
}
