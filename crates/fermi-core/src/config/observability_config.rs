use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration consumed by [`crate::tracing_setup::init_tracing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Fallback filter directive when `FERMI_LOG` is unset. Default: "info".
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json: defaults::DEFAULT_JSON_LOGS,
        }
    }
}
