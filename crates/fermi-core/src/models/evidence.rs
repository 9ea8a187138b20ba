use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;

/// Raw value carried by a piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvidenceValue {
    Number(f64),
    Range((f64, f64)),
    Text(String),
}

impl EvidenceValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

/// One piece of evidence produced by a collaborator, consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source: String,
    pub raw_value: EvidenceValue,
    pub reliability: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EvidenceItem {
    pub fn number(
        source: impl Into<String>,
        value: f64,
        reliability: impl Into<Confidence>,
    ) -> Self {
        Self {
            source: source.into(),
            raw_value: EvidenceValue::Number(value),
            reliability: reliability.into(),
            note: None,
        }
    }

    pub fn text(
        source: impl Into<String>,
        text: impl Into<String>,
        reliability: impl Into<Confidence>,
    ) -> Self {
        Self {
            source: source.into(),
            raw_value: EvidenceValue::Text(text.into()),
            reliability: reliability.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
