//! Top-level Fermi configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    BandingConfig, CascadeConfig, ConsensusConfig, DecompositionConfig, ObservabilityConfig,
};
use crate::errors::ConfigError;
use crate::models::StrategyKind;

/// Project-level config file name, looked up in the root passed to [`FermiConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "fermi.toml";

pub const ENV_MAX_DEPTH: &str = "FERMI_MAX_DEPTH";
pub const ENV_IQR_MULTIPLIER: &str = "FERMI_IQR_MULTIPLIER";
pub const ENV_SIMILARITY_TOLERANCE: &str = "FERMI_SIMILARITY_TOLERANCE";
pub const ENV_MIN_CLUSTER_SIZE: &str = "FERMI_MIN_CLUSTER_SIZE";
pub const ENV_LOG: &str = "FERMI_LOG";

/// Every environment variable consulted by [`FermiConfig::load`].
pub const ENV_VARS: [&str; 5] = [
    ENV_MAX_DEPTH,
    ENV_IQR_MULTIPLIER,
    ENV_SIMILARITY_TOLERANCE,
    ENV_MIN_CLUSTER_SIZE,
    ENV_LOG,
];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`FERMI_*`)
/// 3. Project config (`fermi.toml` in project root)
/// 4. User config (`~/.fermi/config.toml`)
/// 5. Compiled defaults
///
/// File layers are merged key by key, so a file naming one threshold leaves
/// every other value untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FermiConfig {
    pub cascade: CascadeConfig,
    pub decomposition: DecompositionConfig,
    pub consensus: ConsensusConfig,
    pub banding: BandingConfig,
    pub observability: ObservabilityConfig,
}

/// Programmatic overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_depth: Option<usize>,
    pub iqr_multiplier: Option<f64>,
    pub similarity_tolerance: Option<f64>,
    pub min_cluster_size: Option<usize>,
    pub log_level: Option<String>,
    pub disabled_strategies: Vec<StrategyKind>,
    pub thresholds: Vec<(StrategyKind, f64)>,
}

impl FermiConfig {
    /// Load configuration with layered resolution. See the type docs for the order.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut merged = Self::default().to_value()?;

        // Lowest file layer: user config. Only parse failures are fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match read_toml_file(&user_config_path) {
                    Ok(layer) => merge_values(&mut merged, layer),
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(_) => {}
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            merge_values(&mut merged, read_toml_file(&project_config_path)?);
        }

        let mut config: FermiConfig = merged.try_into().map_err(|e: toml::de::Error| {
            ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        config.apply_env_overrides();

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string layered over the compiled defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let layer = parse_toml(toml_str, "<string>")?;
        let mut merged = Self::default().to_value()?;
        merge_values(&mut merged, layer);
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate ranges of every tunable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, strategy) in &self.cascade.strategies {
            check_unit(&format!("cascade.strategies.{name}.threshold"), strategy.threshold)?;
        }

        let d = &self.decomposition;
        if d.max_depth < 1 {
            return Err(invalid("decomposition.max_depth", "must be at least 1"));
        }
        if d.max_candidates < 1 {
            return Err(invalid("decomposition.max_candidates", "must be at least 1"));
        }
        if d.recommended_variables > d.max_variables {
            return Err(invalid(
                "decomposition.recommended_variables",
                "must not exceed decomposition.max_variables",
            ));
        }
        check_unit("decomposition.heuristic_confidence", d.heuristic_confidence)?;
        for (field, weight) in d.weights.as_array() {
            check_unit(&format!("decomposition.weights.{field}"), weight)?;
        }
        if let Some(v) = d.generic_default {
            if !v.is_finite() {
                return Err(invalid("decomposition.generic_default", "must be finite"));
            }
        }

        let c = &self.consensus;
        if !(c.iqr_multiplier.is_finite() && c.iqr_multiplier > 0.0) {
            return Err(invalid("consensus.iqr_multiplier", "must be greater than 0"));
        }
        if !(c.similarity_tolerance > 0.0 && c.similarity_tolerance < 1.0) {
            return Err(invalid(
                "consensus.similarity_tolerance",
                "must be strictly between 0.0 and 1.0",
            ));
        }
        if c.min_cluster_size < 1 {
            return Err(invalid("consensus.min_cluster_size", "must be at least 1"));
        }

        let b = &self.banding;
        for (field, value) in [
            ("banding.high_similarity", b.high_similarity),
            ("banding.high_coverage", b.high_coverage),
            ("banding.medium_similarity", b.medium_similarity),
            ("banding.medium_coverage", b.medium_coverage),
            ("banding.high.base", b.high.base),
            ("banding.high.cap", b.high.cap),
            ("banding.medium.base", b.medium.base),
            ("banding.medium.cap", b.medium.cap),
            ("banding.low.base", b.low.base),
            ("banding.low.cap", b.low.cap),
        ] {
            check_unit(field, value)?;
        }
        Ok(())
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<usize>(ENV_MAX_DEPTH) {
            self.decomposition.max_depth = v;
        }
        if let Some(v) = env_parse::<f64>(ENV_IQR_MULTIPLIER) {
            self.consensus.iqr_multiplier = v;
        }
        if let Some(v) = env_parse::<f64>(ENV_SIMILARITY_TOLERANCE) {
            self.consensus.similarity_tolerance = v;
        }
        if let Some(v) = env_parse::<usize>(ENV_MIN_CLUSTER_SIZE) {
            self.consensus.min_cluster_size = v;
        }
        if let Ok(v) = std::env::var(ENV_LOG) {
            if !v.trim().is_empty() {
                self.observability.log_level = v;
            }
        }
    }

    /// Apply programmatic overrides (highest priority).
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_depth {
            self.decomposition.max_depth = v;
        }
        if let Some(v) = overrides.iqr_multiplier {
            self.consensus.iqr_multiplier = v;
        }
        if let Some(v) = overrides.similarity_tolerance {
            self.consensus.similarity_tolerance = v;
        }
        if let Some(v) = overrides.min_cluster_size {
            self.consensus.min_cluster_size = v;
        }
        if let Some(ref v) = overrides.log_level {
            self.observability.log_level = v.clone();
        }
        for kind in &overrides.disabled_strategies {
            self.cascade.set_enabled(*kind, false);
        }
        for (kind, threshold) in &overrides.thresholds {
            self.cascade.set_threshold(*kind, *threshold);
        }
    }

    /// Returns the user config path: `~/.fermi/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    fn to_value(&self) -> Result<toml::Value, ConfigError> {
        toml::Value::try_from(self).map_err(|e| ConfigError::ParseError {
            path: "<defaults>".to_string(),
            message: e.to_string(),
        })
    }
}

fn read_toml_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.display().to_string(),
    })?;
    parse_toml(&content, &path.display().to_string())
}

fn parse_toml(content: &str, path: &str) -> Result<toml::Value, ConfigError> {
    toml::from_str::<toml::Table>(content)
        .map(toml::Value::Table)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
}

/// Merge `overlay` into `base`. Tables merge per key; any other value replaces.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Returns the user-level config directory: `~/.fermi/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".fermi"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
