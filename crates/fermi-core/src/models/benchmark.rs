use serde::{Deserialize, Serialize};

use super::query::Context;

/// A known exemplar that may stand in for the unknown quantity by analogy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkCandidate {
    pub name: String,
    pub value: f64,
    /// physical, digital, service, ...
    #[serde(default = "unknown")]
    pub product_type: String,
    /// b2c, b2b, b2g
    #[serde(default = "unknown")]
    pub consumer_type: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_essential: bool,
    /// Fraction of the reference population exhibiting the pattern.
    #[serde(default)]
    pub coverage: f64,
    #[serde(default)]
    pub source: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Profile of the quantity being estimated, used by the comparability filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub product_type: String,
    pub consumer_type: String,
    pub price: Option<f64>,
    pub is_essential: bool,
}

impl TargetProfile {
    /// Read a profile from context facts. Requires at least a product or consumer type.
    pub fn from_context(context: &Context) -> Option<Self> {
        let product_type = context.text("product_type").map(str::to_lowercase);
        let consumer_type = context.text("consumer_type").map(str::to_lowercase);
        if product_type.is_none() && consumer_type.is_none() {
            return None;
        }
        Some(Self {
            product_type: product_type.unwrap_or_else(unknown),
            consumer_type: consumer_type.unwrap_or_else(unknown),
            price: context.number("price"),
            is_essential: context.flag("is_essential").unwrap_or(false),
        })
    }
}
