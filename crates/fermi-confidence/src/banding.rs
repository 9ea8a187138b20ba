//! Multi-axis confidence banding.
//!
//! Three axes are judged independently: similarity to a known exemplar,
//! coverage of the pattern in a reference population, and whether an
//! independent validation passed. A rule picks the band, then per-band
//! bonuses fine-tune the score inside it.

use std::fmt;

use fermi_core::config::{BandRule, BandingConfig};
use fermi_core::Confidence;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Map a score back to its band: high from 0.80, medium from 0.60.
    pub fn classify(score: f64) -> Self {
        if score >= Confidence::HIGH {
            Self::High
        } else if score >= Confidence::MEDIUM {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Similarity,
    Coverage,
    Validation,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Similarity => "similarity",
            Self::Coverage => "coverage",
            Self::Validation => "validation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandedConfidence {
    pub overall: Confidence,
    pub band: ConfidenceBand,
    /// Axes that placed the score in its band. For `Low`, the axes that fell short.
    pub deciding_axes: Vec<Axis>,
    pub rationale: String,
}

/// Combine similarity, coverage and validation into a banded confidence.
///
/// Axis values are clamped to [0, 1].
pub fn band(
    similarity: f64,
    coverage: f64,
    validated: bool,
    config: &BandingConfig,
) -> BandedConfidence {
    let similarity = Confidence::new(similarity).value();
    let coverage = Confidence::new(coverage).value();

    let strong_match = similarity >= config.high_similarity && validated;
    let strong_coverage = coverage >= config.high_coverage;

    let (band, rule, deciding_axes) = if strong_match || strong_coverage {
        let mut axes = Vec::new();
        if strong_match {
            axes.extend([Axis::Similarity, Axis::Validation]);
        }
        if strong_coverage {
            axes.push(Axis::Coverage);
        }
        (ConfidenceBand::High, &config.high, axes)
    } else if similarity >= config.medium_similarity || coverage >= config.medium_coverage {
        let mut axes = Vec::new();
        if similarity >= config.medium_similarity {
            axes.push(Axis::Similarity);
        }
        if coverage >= config.medium_coverage {
            axes.push(Axis::Coverage);
        }
        (ConfidenceBand::Medium, &config.medium, axes)
    } else {
        let mut axes = vec![Axis::Similarity, Axis::Coverage];
        if !validated {
            axes.push(Axis::Validation);
        }
        (ConfidenceBand::Low, &config.low, axes)
    };

    let mut score = rule.base
        + BandRule::bonus_for(&rule.similarity_bonuses, similarity)
        + BandRule::bonus_for(&rule.coverage_bonuses, coverage);
    if validated {
        score += rule.validation_bonus;
    }
    let overall = Confidence::new(score.min(rule.cap));

    let axes = deciding_axes
        .iter()
        .map(Axis::as_str)
        .collect::<Vec<_>>()
        .join("+");
    let rationale = format!(
        "{band} band via {axes}: {}; {}; {}",
        describe_similarity(similarity, config),
        describe_coverage(coverage, config),
        if validated { "Validated" } else { "Not yet validated" },
    );

    BandedConfidence {
        overall,
        band,
        deciding_axes,
        rationale,
    }
}

fn describe_similarity(similarity: f64, config: &BandingConfig) -> String {
    let quality = if similarity >= config.high_similarity {
        "Excellent"
    } else if similarity >= config.medium_similarity {
        "Good"
    } else {
        "Moderate"
    };
    format!("{quality} similarity {similarity:.2}")
}

fn describe_coverage(coverage: f64, config: &BandingConfig) -> String {
    let strength = if coverage >= config.high_coverage {
        "strong pattern"
    } else if coverage >= config.medium_coverage {
        "moderate pattern"
    } else {
        "emerging pattern"
    };
    format!("{:.0}% coverage - {strength}", coverage * 100.0)
}
