//! Comparability filter for analogy benchmarks.
//!
//! Four criteria, one point each: product type, consumer type, price level,
//! purchase context. A benchmark scoring 3.5 or more may be adopted as the
//! estimate, 2.5 or more is kept as a reference, anything lower is rejected.

use fermi_core::models::{BenchmarkCandidate, TargetProfile};
use serde::{Deserialize, Serialize};

pub const ADOPT_SCORE: f64 = 3.5;
pub const REFERENCE_SCORE: f64 = 2.5;
pub const MAX_SCORE: f64 = 4.0;

/// Product types close enough to earn half a point against each other.
const SIMILAR_PRODUCT_GROUPS: &[&[&str]] = &[
    &["physical", "hardware", "device"],
    &["digital", "software", "app"],
    &["service", "platform"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Adopt,
    Reference,
    Reject,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        if score >= ADOPT_SCORE {
            Self::Adopt
        } else if score >= REFERENCE_SCORE {
            Self::Reference
        } else {
            Self::Reject
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adopt => "adopt",
            Self::Reference => "reference",
            Self::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparability {
    pub product_type: f64,
    pub consumer_type: f64,
    pub price: f64,
    pub purchase_context: f64,
    pub total: f64,
    pub verdict: Verdict,
}

impl Comparability {
    pub fn similarity(&self) -> f64 {
        self.total / MAX_SCORE
    }

    pub fn breakdown(&self) -> String {
        format!(
            "{}/4 (product {}, consumer {}, price {}, context {}) -> {}",
            self.total,
            self.product_type,
            self.consumer_type,
            self.price,
            self.purchase_context,
            self.verdict.as_str()
        )
    }
}

pub fn score_candidate(target: &TargetProfile, candidate: &BenchmarkCandidate) -> Comparability {
    let product_type = product_similarity(&target.product_type, &candidate.product_type);
    let consumer_type = if known_and_equal(&target.consumer_type, &candidate.consumer_type) {
        1.0
    } else {
        0.0
    };
    let price = price_similarity(target.price, candidate.price);
    let purchase_context = if target.is_essential == candidate.is_essential {
        1.0
    } else {
        0.0
    };
    let total = product_type + consumer_type + price + purchase_context;
    Comparability {
        product_type,
        consumer_type,
        price,
        purchase_context,
        total,
        verdict: Verdict::from_score(total),
    }
}

fn known_and_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    a != "unknown" && a == b
}

fn product_similarity(target: &str, candidate: &str) -> f64 {
    if known_and_equal(target, candidate) {
        return 1.0;
    }
    let (target, candidate) = (target.to_lowercase(), candidate.to_lowercase());
    let shared_group = SIMILAR_PRODUCT_GROUPS.iter().any(|group| {
        group.contains(&target.as_str()) && group.contains(&candidate.as_str())
    });
    if shared_group {
        0.5
    } else {
        0.0
    }
}

fn price_similarity(target: Option<f64>, candidate: Option<f64>) -> f64 {
    let (Some(a), Some(b)) = (target, candidate) else {
        return 0.0;
    };
    if !(a > 0.0 && b > 0.0) {
        return 0.0;
    }
    let ratio = a.max(b) / a.min(b);
    if ratio <= 1.5 {
        1.0
    } else if ratio <= 3.0 {
        0.5
    } else {
        0.0
    }
}
