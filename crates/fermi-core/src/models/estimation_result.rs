use std::fmt;

use serde::{Deserialize, Serialize};

use super::evidence::{EvidenceItem, EvidenceValue};
use crate::confidence::Confidence;

/// The cascade layers, in their fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ExactCache,
    GenerativePrior,
    ExternalConsensus,
    LawLookup,
    Behavioral,
    StatisticalPattern,
    AnalogyBenchmark,
    Decomposition,
    BoundaryConstraint,
}

impl StrategyKind {
    pub const CASCADE_ORDER: [StrategyKind; 9] = [
        Self::ExactCache,
        Self::GenerativePrior,
        Self::ExternalConsensus,
        Self::LawLookup,
        Self::Behavioral,
        Self::StatisticalPattern,
        Self::AnalogyBenchmark,
        Self::Decomposition,
        Self::BoundaryConstraint,
    ];

    /// Key under `[cascade.strategies]`.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::ExactCache => "exact_cache",
            Self::GenerativePrior => "generative_prior",
            Self::ExternalConsensus => "external_consensus",
            Self::LawLookup => "law_lookup",
            Self::Behavioral => "behavioral",
            Self::StatisticalPattern => "statistical_pattern",
            Self::AnalogyBenchmark => "analogy_benchmark",
            Self::Decomposition => "decomposition",
            Self::BoundaryConstraint => "boundary_constraint",
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::CASCADE_ORDER.into_iter().find(|k| k.config_key() == key)
    }

    /// Compiled acceptance threshold.
    pub fn default_threshold(&self) -> f64 {
        match self {
            Self::ExactCache | Self::LawLookup => 1.0,
            Self::GenerativePrior => 0.70,
            Self::ExternalConsensus => 0.80,
            Self::Behavioral => 0.60,
            Self::StatisticalPattern | Self::AnalogyBenchmark => 0.50,
            Self::Decomposition => 0.30,
            Self::BoundaryConstraint => 0.0,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Terminal output of an estimate, success or failure.
///
/// A failed estimate has no value, no range, zero confidence, and a trace
/// explaining every attempt. It is never a silent zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub value: Option<f64>,
    pub value_range: Option<(f64, f64)>,
    pub confidence: Confidence,
    pub source_strategy: Option<StrategyKind>,
    pub reasoning_trace: Vec<String>,
    pub evidence_used: Vec<EvidenceItem>,
    pub evidence_rejected: Vec<EvidenceItem>,
}

impl EstimationResult {
    pub fn point(strategy: StrategyKind, value: f64, confidence: impl Into<Confidence>) -> Self {
        Self {
            value: Some(value),
            value_range: None,
            confidence: confidence.into(),
            source_strategy: Some(strategy),
            reasoning_trace: Vec::new(),
            evidence_used: Vec::new(),
            evidence_rejected: Vec::new(),
        }
    }

    /// A bounded estimate with no point value. Bounds are put in order.
    pub fn range(
        strategy: StrategyKind,
        low: f64,
        high: f64,
        confidence: impl Into<Confidence>,
    ) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            value: None,
            value_range: Some((low, high)),
            confidence: confidence.into(),
            source_strategy: Some(strategy),
            reasoning_trace: Vec::new(),
            evidence_used: Vec::new(),
            evidence_rejected: Vec::new(),
        }
    }

    pub fn no_estimate(reasoning_trace: Vec<String>) -> Self {
        Self {
            value: None,
            value_range: None,
            confidence: Confidence::ZERO,
            source_strategy: None,
            reasoning_trace,
            evidence_used: Vec::new(),
            evidence_rejected: Vec::new(),
        }
    }

    pub fn with_trace(mut self, line: impl Into<String>) -> Self {
        self.reasoning_trace.push(line.into());
        self
    }

    pub fn with_evidence(mut self, item: EvidenceItem) -> Self {
        self.evidence_used.push(item);
        self
    }

    pub fn with_rejected(mut self, item: EvidenceItem) -> Self {
        self.evidence_rejected.push(item);
        self
    }

    /// True when the result carries a point value or a range.
    pub fn has_estimate(&self) -> bool {
        self.value.is_some() || self.value_range.is_some()
    }

    pub fn is_no_estimate(&self) -> bool {
        !self.has_estimate()
    }

    /// Summarize this result as a piece of evidence, e.g. when the cascade rejects it.
    pub fn as_evidence(&self) -> EvidenceItem {
        let raw_value = match (self.value, self.value_range) {
            (Some(v), _) => EvidenceValue::Number(v),
            (None, Some(r)) => EvidenceValue::Range(r),
            (None, None) => EvidenceValue::Text("no estimate".to_string()),
        };
        EvidenceItem {
            source: self
                .source_strategy
                .map_or_else(|| "none".to_string(), |s| s.config_key().to_string()),
            raw_value,
            reliability: self.confidence,
            note: None,
        }
    }

    /// One-line human summary of the value part.
    pub fn describe_value(&self) -> String {
        match (self.value, self.value_range) {
            (Some(v), _) => format!("{v}"),
            (None, Some((lo, hi))) => format!("[{lo}, {hi}]"),
            (None, None) => "none".to_string(),
        }
    }
}
