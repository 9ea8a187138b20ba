//! Variable-count policy.

use fermi_core::config::DecompositionConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyVerdict {
    Accept,
    /// Above the recommended count; kept, with a note for the trace.
    Warn(String),
    /// Above the hard maximum.
    Reject(String),
}

pub fn check_variable_count(count: usize, config: &DecompositionConfig) -> PolicyVerdict {
    if count > config.max_variables {
        PolicyVerdict::Reject(format!(
            "{count} variables exceeds the maximum of {}",
            config.max_variables
        ))
    } else if count > config.recommended_variables {
        PolicyVerdict::Warn(format!(
            "{count} variables is above the recommended {}; accuracy may suffer",
            config.recommended_variables
        ))
    } else {
        PolicyVerdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        let config = DecompositionConfig::default();
        assert_eq!(check_variable_count(3, &config), PolicyVerdict::Accept);
        assert_eq!(check_variable_count(6, &config), PolicyVerdict::Accept);
        assert!(matches!(check_variable_count(7, &config), PolicyVerdict::Warn(_)));
        assert!(matches!(check_variable_count(10, &config), PolicyVerdict::Warn(_)));
        assert!(matches!(check_variable_count(11, &config), PolicyVerdict::Reject(_)));
    }
}
