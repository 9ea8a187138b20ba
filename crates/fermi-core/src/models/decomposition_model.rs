use serde::{Deserialize, Serialize};

use super::variable::Variable;

/// A candidate formula expressing a target quantity in terms of named variables.
///
/// Produced by the model proposer. After creation only the `variables` list is
/// mutated, and only through variable resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionModel {
    pub id: String,
    pub formula: String,
    pub variables: Vec<Variable>,
    pub description: String,
}

impl DecompositionModel {
    pub fn new(
        id: impl Into<String>,
        formula: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            formula: formula.into(),
            variables: Vec::new(),
            description: description.into(),
        }
    }

    /// Declare variables by name. Duplicate names are ignored.
    pub fn with_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare(name.into());
        }
        self
    }

    /// Declare a variable if it is not already present. Returns `true` if added.
    pub fn declare(&mut self, name: String) -> bool {
        if self.variable(&name).is_some() {
            return false;
        }
        self.variables.push(Variable::unresolved(name));
        true
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Feasible iff every variable has a value.
    pub fn is_feasible(&self) -> bool {
        self.variables.iter().all(|v| v.value.is_some())
    }

    pub fn unresolved_names(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.value.is_none())
            .map(|v| v.name.as_str())
            .collect()
    }
}
