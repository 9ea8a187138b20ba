//! Built-in cascade layers.
//!
//! Deterministic layers (`exact_cache`, `law_lookup`, `behavioral`,
//! `statistical_pattern`, `boundary_constraint`) need nothing injected.
//! The others wrap a collaborator and are only installed when one is given.

pub mod analogy;
pub mod behavioral;
pub mod boundary;
pub mod comparability;
pub mod consensus;
pub mod decomposition;
pub mod exact_cache;
pub mod law_lookup;
pub mod provider;
pub mod statistical_pattern;

pub use analogy::AnalogyStrategy;
pub use behavioral::BehavioralStrategy;
pub use boundary::BoundaryStrategy;
pub use comparability::{score_candidate, Comparability, Verdict};
pub use consensus::ConsensusStrategy;
pub use decomposition::DecompositionStrategy;
pub use exact_cache::ExactCacheStrategy;
pub use law_lookup::LawLookupStrategy;
pub use provider::ProviderStrategy;
pub use statistical_pattern::StatisticalPatternStrategy;

/// Lower-cased alphanumeric words of a query, `_` and punctuation split.
pub(crate) fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub(crate) fn mentions_any(words: &[String], keywords: &[&str]) -> bool {
    words.iter().any(|w| keywords.contains(&w.as_str()))
}

/// Words that mark a query as asking for a ratio of some population.
pub(crate) const RATIO_WORDS: &[&str] = &[
    "rate",
    "ratio",
    "percentage",
    "percent",
    "share",
    "proportion",
    "fraction",
];

pub(crate) fn is_ratio_query(text: &str) -> bool {
    text.contains('%') || mentions_any(&words(text), RATIO_WORDS)
}
