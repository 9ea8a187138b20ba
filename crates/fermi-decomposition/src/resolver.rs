//! Variable resolution: context/cache, then recursive estimate, then heuristic default.

use std::collections::BTreeMap;

use fermi_core::config::DecompositionConfig;
use fermi_core::models::{normalize_key, DecompositionModel, Query, SourceKind, Variable};
use fermi_core::traits::Estimator;
use fermi_core::{Confidence, EstimationError, FermiErrorCode, RequestScope};
use tracing::{debug, warn};

use crate::heuristics::heuristic_default;

/// Resolves every variable of a model inside one request.
pub struct Resolver<'a> {
    pub config: &'a DecompositionConfig,
    pub known_facts: &'a BTreeMap<String, f64>,
    pub engine: &'a dyn Estimator,
    pub scope: &'a RequestScope,
    pub query: &'a Query,
    pub depth: usize,
}

impl Resolver<'_> {
    /// Resolve all variables of `model`, in declaration order.
    ///
    /// Errors with `InfeasibleModel` when a variable has no value from any
    /// source, and with `Cancelled` when the request was cancelled.
    pub fn resolve_model(
        &self,
        model: &mut DecompositionModel,
        trace: &mut Vec<String>,
    ) -> Result<(), EstimationError> {
        let model_id = model.id.clone();
        for variable in model.variables.iter_mut() {
            self.resolve_variable(variable, &model_id, trace)?;
        }
        Ok(())
    }

    fn resolve_variable(
        &self,
        variable: &mut Variable,
        model_id: &str,
        trace: &mut Vec<String>,
    ) -> Result<(), EstimationError> {
        if variable.resolved {
            return Ok(());
        }

        if let Some(value) = self.cached(&variable.name) {
            variable.resolve(value, SourceKind::Cached, Confidence::CERTAIN, self.depth);
            trace.push(format!("  {}: cached {value}", variable.name));
            return Ok(());
        }

        if self.scope.is_cancelled() {
            return Err(EstimationError::Cancelled);
        }

        if !self.scope.can_descend(self.depth) {
            let err = EstimationError::DepthExceeded {
                depth: self.depth + 1,
                max_depth: self.scope.max_depth,
            };
            debug!(variable = %variable.name, depth = self.depth, "depth bound reached");
            trace.push(format!("  {}: {}", variable.name, err.trace_line()));
            return self.fall_back(variable, model_id, trace);
        }

        let child = self.query.child(variable.name.clone());
        let entry = match self.scope.guard.enter(&child.key()) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    variable = %variable.name,
                    code = err.error_code(),
                    "cycle detected, using heuristic default"
                );
                trace.push(format!("  {}: {}", variable.name, err.trace_line()));
                return self.fall_back(variable, model_id, trace);
            }
        };
        let result = self.engine.estimate_in_scope(&child, self.depth + 1, self.scope);
        drop(entry);
        let child_trace = result.reasoning_trace.iter().map(|l| format!("    {l}"));

        match result.value {
            Some(value) => {
                let strategy = result
                    .source_strategy
                    .map_or("unknown", |s| s.config_key());
                variable.resolve(
                    value,
                    SourceKind::Recursive,
                    result.confidence,
                    self.depth + 1,
                );
                trace.push(format!(
                    "  {}: recursive estimate {value} via {strategy} (confidence {}, depth {})",
                    variable.name,
                    result.confidence,
                    self.depth + 1
                ));
                trace.extend(child_trace);
                Ok(())
            }
            None => {
                trace.push(format!(
                    "  {}: sub-estimate gave no point value ({})",
                    variable.name,
                    result.describe_value()
                ));
                trace.extend(child_trace);
                if self.scope.is_cancelled() {
                    return Err(EstimationError::Cancelled);
                }
                self.fall_back(variable, model_id, trace)
            }
        }
    }

    fn cached(&self, name: &str) -> Option<f64> {
        self.query
            .context()
            .number(name)
            .or_else(|| self.known_facts.get(&normalize_key(name)).copied())
    }

    fn fall_back(
        &self,
        variable: &mut Variable,
        model_id: &str,
        trace: &mut Vec<String>,
    ) -> Result<(), EstimationError> {
        match heuristic_default(&variable.name, self.query.context(), self.config) {
            Some(default) => {
                let confidence = Confidence::new(self.config.heuristic_confidence);
                variable.resolve(
                    default.value,
                    SourceKind::HeuristicDefault,
                    confidence,
                    self.depth,
                );
                trace.push(format!(
                    "  {}: heuristic default {} from {} (confidence {confidence})",
                    variable.name, default.value, default.rule
                ));
                Ok(())
            }
            None => Err(EstimationError::InfeasibleModel {
                model_id: model_id.to_string(),
                reason: format!("variable '{}' is unresolvable", variable.name),
            }),
        }
    }
}
