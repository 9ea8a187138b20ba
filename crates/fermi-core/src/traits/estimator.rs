use crate::guard::RequestScope;
use crate::models::{EstimationResult, Query};

/// Anything that can estimate a query inside an existing request.
///
/// The cascade controller implements this; the decomposition search calls
/// back into it to resolve sub-variables, threading the same
/// [`RequestScope`] through every level of the call tree.
pub trait Estimator {
    /// Estimate `query` at recursion `depth` (0 for the top-level query).
    /// Never fails: a failure is an explicit no-estimate result.
    fn estimate_in_scope(&self, query: &Query, depth: usize, scope: &RequestScope)
        -> EstimationResult;
}
