//! Model scoring.
//!
//! `score = w_filled·filled + w_conf·confidence + w_complexity·complexity + w_depth·depth`
//! with default weights 0.5 / 0.3 / 0.2 / 0.1. Only fully resolved models are scored.

use std::cmp::Ordering;

use fermi_confidence::fuse;
use fermi_core::config::ScoringWeights;
use fermi_core::models::DecompositionModel;
use fermi_core::Confidence;
use serde::{Deserialize, Serialize};

/// Complexity score by variable count: peaks at 2–3, degrades from 4, zero beyond 10.
pub fn complexity_score(variable_count: usize) -> f64 {
    match variable_count {
        0 => 0.0,
        1 => 0.9,
        2 | 3 => 1.0,
        4 => 0.7,
        5 => 0.5,
        6 => 0.3,
        7 => 0.2,
        8 => 0.15,
        9 => 0.10,
        10 => 0.05,
        _ => 0.0,
    }
}

/// Bonus for resolving at shallow depth.
pub fn depth_bonus(depth: usize) -> f64 {
    match depth {
        0 => 1.0,
        1 => 0.8,
        2 => 0.6,
        3 => 0.4,
        _ => 0.2,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    /// Fraction of variables resolved from cached or recursive sources.
    pub filled: f64,
    pub confidence: Confidence,
    pub complexity: f64,
    pub depth: f64,
    pub total: f64,
    pub defaults_used: usize,
}

impl ModelScore {
    pub fn breakdown(&self) -> String {
        format!(
            "score {:.3} [filled {:.2}, confidence {}, complexity {:.2}, depth {:.2}, \
             defaults {}]",
            self.total,
            self.filled,
            self.confidence,
            self.complexity,
            self.depth,
            self.defaults_used
        )
    }
}

/// Score a feasible model. Returns `None` if any variable is still unresolved.
pub fn score_model(model: &DecompositionModel, weights: &ScoringWeights) -> Option<ModelScore> {
    if !model.is_feasible() {
        return None;
    }
    let count = model.variables.len();
    let defaults_used = model
        .variables
        .iter()
        .filter(|v| v.is_heuristic_default())
        .count();
    let filled = if count == 0 {
        1.0
    } else {
        (count - defaults_used) as f64 / count as f64
    };
    let confidences: Vec<Confidence> = model.variables.iter().map(|v| v.confidence).collect();
    let confidence = if confidences.is_empty() {
        Confidence::CERTAIN
    } else {
        fuse(&confidences)
    };
    let complexity = complexity_score(count);
    let depth = depth_bonus(model.variables.iter().map(|v| v.depth).max().unwrap_or(0));

    let total = weights.filled * filled
        + weights.confidence * confidence.value()
        + weights.complexity * complexity
        + weights.depth * depth;

    Some(ModelScore {
        filled,
        confidence,
        complexity,
        depth,
        total,
        defaults_used,
    })
}

/// Ranking order: higher total first, then fewer heuristic defaults.
pub fn compare(a: &ModelScore, b: &ModelScore) -> Ordering {
    b.total
        .total_cmp(&a.total)
        .then_with(|| a.defaults_used.cmp(&b.defaults_used))
}
