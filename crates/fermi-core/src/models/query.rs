use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalize a query or variable name into its lookup/cycle key:
/// trimmed, lower-cased, inner whitespace collapsed to single spaces.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single known fact supplied alongside a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl ContextValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for ContextValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Structured context: known facts plus optional domain/region/time hints.
///
/// Fact keys are stored normalized, so `"Price"` and `" price "` address the
/// same fact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub facts: BTreeMap<String, ContextValue>,
    pub domain: Option<String>,
    pub region: Option<String>,
    pub time_period: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fact(mut self, key: &str, value: impl Into<ContextValue>) -> Self {
        self.facts.insert(normalize_key(key), value.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_time_period(mut self, time_period: impl Into<String>) -> Self {
        self.time_period = Some(time_period.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.facts.get(&normalize_key(key))
    }

    /// Numeric fact lookup. Non-numeric and non-finite facts are ignored.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ContextValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ContextValue::as_text)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ContextValue::as_bool)
    }

    /// All numeric facts, in key order.
    pub fn numeric_facts(&self) -> BTreeMap<String, f64> {
        self.facts
            .iter()
            .filter_map(|(k, v)| v.as_number().map(|n| (k.clone(), n)))
            .collect()
    }

    /// Lower-cased domain hint, or an empty string.
    pub fn domain_lower(&self) -> String {
        self.domain.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// The unknown quantity being estimated. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    #[serde(default)]
    context: Context,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: Context::default(),
        }
    }

    pub fn with_context(text: impl Into<String>, context: Context) -> Self {
        Self {
            text: text.into(),
            context,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The normalized text used for cache lookups and cycle detection.
    pub fn key(&self) -> String {
        normalize_key(&self.text)
    }

    /// Derive a sub-query for a decomposition variable, inheriting this query's context.
    pub fn child(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: self.context.clone(),
        }
    }
}
