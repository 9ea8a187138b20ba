//! Configuration system for Fermi.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod banding_config;
pub mod cascade_config;
pub mod consensus_config;
pub mod decomposition_config;
pub mod defaults;
pub mod fermi_config;
pub mod observability_config;

pub use banding_config::{BandRule, BandingConfig, BonusStep};
pub use cascade_config::{CascadeConfig, StrategyConfig};
pub use consensus_config::ConsensusConfig;
pub use decomposition_config::{DecompositionConfig, ScoringWeights};
pub use fermi_config::{ConfigOverrides, FermiConfig};
pub use observability_config::ObservabilityConfig;
