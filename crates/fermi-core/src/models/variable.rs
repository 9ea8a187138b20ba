use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;

/// Where a resolved variable's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Known fact from context or the fact cache.
    Cached,
    /// Resolved by a recursive estimate.
    Recursive,
    /// Fixed low-confidence fallback.
    HeuristicDefault,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Recursive => "recursive",
            Self::HeuristicDefault => "heuristic-default",
        }
    }
}

/// A named sub-quantity referenced by a decomposition model.
///
/// Resolution is single-assignment: once resolved, further calls to
/// [`Variable::resolve`] are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: Option<f64>,
    pub resolved: bool,
    pub source_kind: Option<SourceKind>,
    pub confidence: Confidence,
    pub depth: usize,
}

impl Variable {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            resolved: false,
            source_kind: None,
            confidence: Confidence::ZERO,
            depth: 0,
        }
    }

    /// Assign a value. Returns `false` (and changes nothing) if already resolved.
    pub fn resolve(
        &mut self,
        value: f64,
        source_kind: SourceKind,
        confidence: Confidence,
        depth: usize,
    ) -> bool {
        if self.resolved {
            return false;
        }
        self.value = Some(value);
        self.resolved = true;
        self.source_kind = Some(source_kind);
        self.confidence = confidence;
        self.depth = depth;
        true
    }

    pub fn is_heuristic_default(&self) -> bool {
        self.source_kind == Some(SourceKind::HeuristicDefault)
    }
}
