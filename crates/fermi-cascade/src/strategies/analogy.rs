use fermi_confidence::band;
use fermi_core::models::{
    BenchmarkCandidate, EstimationResult, EvidenceItem, StrategyKind, TargetProfile,
};
use fermi_core::traits::BenchmarkProvider;
use fermi_core::EstimationError;
use tracing::debug;

use super::comparability::{score_candidate, Comparability, Verdict};
use crate::strategy::{Strategy, StrategyRequest};

/// Analogy layer: borrow the value of a comparable benchmark.
///
/// Needs a target profile in the query context (`product_type` and/or
/// `consumer_type`); without one there is nothing to compare against.
pub struct AnalogyStrategy {
    provider: Box<dyn BenchmarkProvider>,
}

impl AnalogyStrategy {
    pub fn new(provider: Box<dyn BenchmarkProvider>) -> Self {
        Self { provider }
    }
}

impl Strategy for AnalogyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AnalogyBenchmark
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let Some(target) = TargetProfile::from_context(request.query.context()) else {
            return Ok(None);
        };
        let candidates = self.provider.candidates(request.query)?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let mut scored: Vec<(BenchmarkCandidate, Comparability)> = candidates
            .into_iter()
            .filter(|c| c.value.is_finite())
            .map(|c| {
                let score = score_candidate(&target, &c);
                (c, score)
            })
            .collect();
        // Best score first, higher coverage breaks ties.
        scored.sort_by(|(a, sa), (b, sb)| {
            sb.total
                .total_cmp(&sa.total)
                .then(b.coverage.total_cmp(&a.coverage))
        });

        let mut trace = Vec::with_capacity(scored.len() + 1);
        for (candidate, score) in &scored {
            trace.push(format!("benchmark \"{}\": {}", candidate.name, score.breakdown()));
        }

        let chosen = scored
            .iter()
            .position(|(_, score)| score.verdict != Verdict::Reject);
        let Some(chosen) = chosen else {
            let mut failed = EstimationResult::no_estimate(trace);
            failed.source_strategy = Some(StrategyKind::AnalogyBenchmark);
            failed
                .reasoning_trace
                .push("every benchmark failed the comparability filter".to_string());
            failed.evidence_rejected = scored.iter().map(|(c, s)| evidence(c, s)).collect();
            return Ok(Some(failed));
        };

        let (candidate, score) = &scored[chosen];
        let adopted = score.verdict == Verdict::Adopt;
        let banded = band(
            score.similarity(),
            candidate.coverage,
            adopted,
            &request.config.banding,
        );
        debug!(
            benchmark = %candidate.name,
            score = score.total,
            confidence = banded.overall.value(),
            "benchmark selected"
        );
        trace.push(format!(
            "{} \"{}\" = {}: {}",
            if adopted { "adopted" } else { "referenced" },
            candidate.name,
            candidate.value,
            banded.rationale
        ));

        let mut result = EstimationResult::point(
            StrategyKind::AnalogyBenchmark,
            candidate.value,
            banded.overall,
        );
        result.reasoning_trace = trace;
        result.evidence_used.push(evidence(candidate, score));
        for (i, (other, other_score)) in scored.iter().enumerate() {
            if i != chosen {
                result.evidence_rejected.push(evidence(other, other_score));
            }
        }
        Ok(Some(result))
    }
}

fn evidence(candidate: &BenchmarkCandidate, score: &Comparability) -> EvidenceItem {
    EvidenceItem::number(candidate.name.clone(), candidate.value, score.similarity())
        .with_note(format!("comparability {}/4, {}", score.total, score.verdict.as_str()))
}
