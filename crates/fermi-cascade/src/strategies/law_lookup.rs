//! Definitional constants: the only layer that may answer with certainty
//! without any evidence.

use std::sync::LazyLock;

use fermi_core::models::{EstimationResult, EvidenceItem, StrategyKind};
use fermi_core::{Confidence, EstimationError};
use regex::Regex;

use crate::strategy::{Strategy, StrategyRequest};

/// A unit-conversion constant and the question form it answers.
pub struct Law {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub value: f64,
}

impl Law {
    const fn new(
        name: &'static str,
        regex: &'static LazyLock<Option<Regex>>,
        value: f64,
    ) -> Self {
        Self { name, regex, value }
    }
}

macro_rules! law_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Matched against the normalized query key, so lower-case and single-spaced.
law_pattern!(
    RE_HOURS_PER_DAY,
    r"^(?:how many )?hours? (?:are there )?(?:in|per) (?:a |an |one |each |every )?day\??$"
);
law_pattern!(
    RE_DAYS_PER_WEEK,
    r"^(?:how many )?days? (?:are there )?(?:in|per) (?:a |an |one |each |every )?week\??$"
);
law_pattern!(
    RE_DAYS_PER_MONTH,
    r"^(?:how many )?days? (?:are there )?(?:in|per) (?:a |an |one |each |every )?month\??$"
);
law_pattern!(
    RE_DAYS_PER_YEAR,
    r"^(?:how many )?days? (?:are there )?(?:in|per) (?:a |an |one |each |every )?year\??$"
);
law_pattern!(
    RE_HOURS_PER_WEEK,
    r"^(?:how many )?hours? (?:are there )?(?:in|per) (?:a |an |one |each |every )?week\??$"
);
law_pattern!(
    RE_MINUTES_PER_HOUR,
    r"^(?:how many )?minutes? (?:are there )?(?:in|per) (?:a |an |one |each |every )?hour\??$"
);
law_pattern!(
    RE_SECONDS_PER_DAY,
    r"^(?:how many )?seconds? (?:are there )?(?:in|per) (?:a |an |one |each |every )?day\??$"
);
law_pattern!(
    RE_MONTHS_PER_YEAR,
    r"^(?:how many )?months? (?:are there )?(?:in|per) (?:a |an |one |each |every )?year\??$"
);

pub static LAWS: &[Law] = &[
    Law::new("hours per day", &RE_HOURS_PER_DAY, 24.0),
    Law::new("days per week", &RE_DAYS_PER_WEEK, 7.0),
    Law::new("days per month", &RE_DAYS_PER_MONTH, 30.0),
    Law::new("days per year", &RE_DAYS_PER_YEAR, 365.0),
    Law::new("hours per week", &RE_HOURS_PER_WEEK, 168.0),
    Law::new("minutes per hour", &RE_MINUTES_PER_HOUR, 60.0),
    Law::new("seconds per day", &RE_SECONDS_PER_DAY, 86_400.0),
    Law::new("months per year", &RE_MONTHS_PER_YEAR, 12.0),
];

/// The first law whose question form matches `key`.
pub fn find_law(key: &str) -> Option<&'static Law> {
    LAWS.iter()
        .find(|law| law.regex.as_ref().is_some_and(|re| re.is_match(key)))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LawLookupStrategy;

impl Strategy for LawLookupStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LawLookup
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        Ok(find_law(&request.query.key()).map(|law| {
            EstimationResult::point(StrategyKind::LawLookup, law.value, Confidence::CERTAIN)
                .with_trace(format!("definitional constant: {} = {}", law.name, law.value))
                .with_evidence(EvidenceItem::number(law.name, law.value, Confidence::CERTAIN))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_law_compiles() {
        for law in LAWS {
            assert!(law.regex.is_some(), "{} failed to compile", law.name);
        }
    }

    #[test]
    fn question_forms_match() {
        assert_eq!(find_law("how many hours are there in a day?").map(|l| l.value), Some(24.0));
        assert_eq!(find_law("days per week").map(|l| l.value), Some(7.0));
        assert_eq!(find_law("seconds in a day").map(|l| l.value), Some(86_400.0));
        assert_eq!(find_law("how many months in a year").map(|l| l.value), Some(12.0));
    }

    #[test]
    fn quantities_measured_in_units_do_not_match() {
        assert!(find_law("hours per day spent watching tv").is_none());
        assert!(find_law("average days per year of sick leave").is_none());
    }
}
