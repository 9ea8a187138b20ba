use serde::{Deserialize, Serialize};

use super::defaults;

/// A bonus granted when an axis value reaches `at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusStep {
    pub at: f64,
    pub bonus: f64,
}

const fn step(at: f64, bonus: f64) -> BonusStep {
    BonusStep { at, bonus }
}

/// Scoring rule inside one band.
///
/// Only the highest qualifying step per axis applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRule {
    pub base: f64,
    pub cap: f64,
    #[serde(default)]
    pub similarity_bonuses: Vec<BonusStep>,
    #[serde(default)]
    pub coverage_bonuses: Vec<BonusStep>,
    #[serde(default)]
    pub validation_bonus: f64,
}

impl BandRule {
    /// Bonus for `value` on a step table; steps may be listed in any order.
    pub fn bonus_for(steps: &[BonusStep], value: f64) -> f64 {
        steps
            .iter()
            .filter(|s| value >= s.at)
            .max_by(|a, b| a.at.total_cmp(&b.at))
            .map_or(0.0, |s| s.bonus)
    }
}

/// Multi-axis confidence banding thresholds and per-band bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandingConfig {
    /// Similarity that, with validation, enters the high band.
    pub high_similarity: f64,
    /// Coverage that enters the high band on its own.
    pub high_coverage: f64,
    pub medium_similarity: f64,
    pub medium_coverage: f64,
    pub high: BandRule,
    pub medium: BandRule,
    pub low: BandRule,
}

impl Default for BandingConfig {
    fn default() -> Self {
        Self {
            high_similarity: defaults::DEFAULT_HIGH_SIMILARITY,
            high_coverage: defaults::DEFAULT_HIGH_COVERAGE,
            medium_similarity: defaults::DEFAULT_MEDIUM_SIMILARITY,
            medium_coverage: defaults::DEFAULT_MEDIUM_COVERAGE,
            high: BandRule {
                base: defaults::DEFAULT_HIGH_BASE,
                cap: defaults::DEFAULT_HIGH_CAP,
                similarity_bonuses: vec![step(0.95, 0.10), step(0.90, 0.05)],
                coverage_bonuses: vec![step(0.20, 0.05), step(0.15, 0.03), step(0.10, 0.02)],
                validation_bonus: 0.0,
            },
            medium: BandRule {
                base: defaults::DEFAULT_MEDIUM_BASE,
                cap: defaults::DEFAULT_MEDIUM_CAP,
                similarity_bonuses: vec![step(0.85, 0.12), step(0.75, 0.08), step(0.70, 0.04)],
                coverage_bonuses: vec![step(0.08, 0.07), step(0.05, 0.03)],
                validation_bonus: 0.05,
            },
            low: BandRule {
                base: defaults::DEFAULT_LOW_BASE,
                cap: defaults::DEFAULT_LOW_CAP,
                similarity_bonuses: vec![step(0.60, 0.10), step(0.50, 0.05)],
                coverage_bonuses: vec![step(0.03, 0.05)],
                validation_bonus: 0.08,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_qualifying_step_wins() {
        let steps = [step(0.90, 0.05), step(0.95, 0.10)];
        assert_eq!(BandRule::bonus_for(&steps, 0.97), 0.10);
        assert_eq!(BandRule::bonus_for(&steps, 0.92), 0.05);
        assert_eq!(BandRule::bonus_for(&steps, 0.50), 0.0);
    }
}
