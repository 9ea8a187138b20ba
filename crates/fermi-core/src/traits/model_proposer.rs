use std::collections::BTreeMap;

use crate::errors::ProposerError;
use crate::models::{DecompositionModel, Query};

/// Produces candidate decomposition models for a query.
///
/// `known` holds the numeric facts already available to the request, so a
/// proposer can prefer formulas over quantities that need no further search.
pub trait ModelProposer: Send + Sync {
    fn propose(
        &self,
        query: &Query,
        known: &BTreeMap<String, f64>,
    ) -> Result<Vec<DecompositionModel>, ProposerError>;
}
