use fermi_consensus::extract;
use fermi_core::models::{EstimationResult, StrategyKind};
use fermi_core::traits::SampleProvider;
use fermi_core::EstimationError;
use tracing::debug;

use crate::strategy::{Strategy, StrategyRequest};

/// External-consensus layer: gathers samples and reduces them to one value.
pub struct ConsensusStrategy {
    provider: Box<dyn SampleProvider>,
}

impl ConsensusStrategy {
    pub fn new(provider: Box<dyn SampleProvider>) -> Self {
        Self { provider }
    }
}

impl Strategy for ConsensusStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ExternalConsensus
    }

    fn attempt(
        &self,
        request: &StrategyRequest<'_>,
    ) -> Result<Option<EstimationResult>, EstimationError> {
        let items = self.provider.samples(request.query)?;
        if items.is_empty() {
            return Ok(None);
        }
        let _span = fermi_core::consensus_span!(items.len()).entered();

        let values: Vec<f64> = items
            .iter()
            .filter_map(|i| i.raw_value.as_number())
            .collect();
        let Some(consensus) = extract(&values, &request.config.consensus) else {
            let mut failed = EstimationResult::no_estimate(vec![format!(
                "{} numeric sample(s) from {}: insufficient evidence for consensus",
                values.len(),
                self.provider.name()
            )]);
            failed.source_strategy = Some(StrategyKind::ExternalConsensus);
            return Ok(Some(failed));
        };

        debug!(
            value = consensus.value,
            cluster = consensus.cluster_size,
            outliers = consensus.outliers_removed.len(),
            "consensus extracted"
        );

        let mut result = EstimationResult::point(
            StrategyKind::ExternalConsensus,
            consensus.value,
            consensus.confidence(),
        )
        .with_trace(format!(
            "{} samples from {}, {} outlier(s) removed, {} cluster(s)",
            consensus.sample_count,
            self.provider.name(),
            consensus.outliers_removed.len(),
            consensus.cluster_count
        ))
        .with_trace(if consensus.used_fallback {
            format!(
                "no cluster reached {} members, using median of all = {}",
                request.config.consensus.min_cluster_size, consensus.value
            )
        } else {
            format!(
                "largest cluster has {} members, median = {}",
                consensus.cluster_size, consensus.value
            )
        });

        let mut outliers = consensus.outliers_removed.clone();
        for item in items {
            let Some(value) = item.raw_value.as_number() else {
                result.evidence_rejected.push(item.with_note("not numeric"));
                continue;
            };
            match outliers.iter().position(|o| *o == value) {
                Some(pos) => {
                    outliers.remove(pos);
                    result.evidence_rejected.push(item.with_note("iqr outlier"));
                }
                None => result.evidence_used.push(item),
            }
        }
        Ok(Some(result))
    }
}

