use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::StrategyKind;

/// Per-strategy switch and acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub threshold: f64,
}

fn enabled_by_default() -> bool {
    true
}

impl StrategyConfig {
    pub fn for_kind(kind: StrategyKind) -> Self {
        Self {
            enabled: true,
            threshold: kind.default_threshold(),
        }
    }
}

/// Evidence cascade configuration.
///
/// Strategies are keyed by [`StrategyKind::config_key`]. The cascade order is
/// fixed; this table only enables, disables, and tunes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub strategies: BTreeMap<String, StrategyConfig>,
    /// Facts read by the exact-cache strategy in addition to query context.
    pub known_facts: BTreeMap<String, f64>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        let strategies = StrategyKind::CASCADE_ORDER
            .iter()
            .map(|k| (k.config_key().to_string(), StrategyConfig::for_kind(*k)))
            .collect();
        Self {
            strategies,
            known_facts: BTreeMap::new(),
        }
    }
}

impl CascadeConfig {
    /// Effective settings for a strategy, falling back to its compiled default.
    pub fn strategy(&self, kind: StrategyKind) -> StrategyConfig {
        self.strategies
            .get(kind.config_key())
            .copied()
            .unwrap_or_else(|| StrategyConfig::for_kind(kind))
    }

    pub fn is_enabled(&self, kind: StrategyKind) -> bool {
        self.strategy(kind).enabled
    }

    pub fn threshold(&self, kind: StrategyKind) -> f64 {
        self.strategy(kind).threshold
    }

    pub fn set_enabled(&mut self, kind: StrategyKind, enabled: bool) {
        self.strategies
            .entry(kind.config_key().to_string())
            .or_insert_with(|| StrategyConfig::for_kind(kind))
            .enabled = enabled;
    }

    pub fn set_threshold(&mut self, kind: StrategyKind, threshold: f64) {
        self.strategies
            .entry(kind.config_key().to_string())
            .or_insert_with(|| StrategyConfig::for_kind(kind))
            .threshold = threshold;
    }

    /// Disable every strategy except `kinds`.
    pub fn only(&mut self, kinds: &[StrategyKind]) {
        for kind in StrategyKind::CASCADE_ORDER {
            self.set_enabled(kind, kinds.contains(&kind));
        }
    }
}
