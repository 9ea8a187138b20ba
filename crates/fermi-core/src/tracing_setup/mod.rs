//! Subscriber installation and span helpers.

pub mod spans;

use tracing_subscriber::EnvFilter;

use crate::config::fermi_config::ENV_LOG;
use crate::config::ObservabilityConfig;

/// Install the global `tracing` subscriber.
///
/// `FERMI_LOG` takes precedence over `config.log_level`. Safe to call more
/// than once; returns `true` only for the call that installed the subscriber.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::defaults::DEFAULT_LOG_LEVEL));

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_a_no_op() {
        let config = ObservabilityConfig::default();
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
