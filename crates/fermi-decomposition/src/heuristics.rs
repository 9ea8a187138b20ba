//! Conservative fallback values for variables that cannot be resolved otherwise.

use fermi_core::config::DecompositionConfig;
use fermi_core::models::{normalize_key, Context};

/// A fallback value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicDefault {
    pub value: f64,
    pub rule: String,
}

/// Look up a fallback for `name`.
///
/// Order: configured keyword rules (longest keyword first), built-in keyword
/// table, configured generic default. `None` means the variable is
/// unresolvable.
pub fn heuristic_default(
    name: &str,
    context: &Context,
    config: &DecompositionConfig,
) -> Option<HeuristicDefault> {
    let key = normalize_key(name);

    let configured = config
        .heuristic_defaults
        .iter()
        .filter(|(keyword, _)| key.contains(&normalize_key(keyword)))
        .max_by_key(|(keyword, _)| keyword.len());
    if let Some((keyword, value)) = configured {
        return Some(HeuristicDefault {
            value: *value,
            rule: format!("configured rule '{keyword}'"),
        });
    }

    if let Some(found) = builtin_default(&key, &context.domain_lower()) {
        return Some(found);
    }

    config.generic_default.map(|value| HeuristicDefault {
        value,
        rule: "generic default".to_string(),
    })
}

fn builtin_default(key: &str, domain: &str) -> Option<HeuristicDefault> {
    let rule = |value: f64, rule: &str| {
        Some(HeuristicDefault {
            value,
            rule: rule.to_string(),
        })
    };

    if key.contains("adoption") || key.contains("penetration") {
        return rule(0.20, "conservative adoption rate");
    }
    if key.contains("arpu") {
        return if domain.contains("b2b") {
            rule(50_000.0, "conservative B2B ARPU")
        } else {
            rule(5_000.0, "conservative B2C ARPU")
        };
    }
    if key.contains("people_per") || key.contains("density") {
        return if domain.contains("cafe") {
            rule(500.0, "conservative cafe catchment")
        } else {
            rule(100.0, "conservative venue catchment")
        };
    }
    None
}
