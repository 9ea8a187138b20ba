//! # fermi-cascade
//!
//! Top-level entry point of the estimation engine.
//!
//! ## Cascade layers (fixed order)
//!
//! | Layer | Evidence | Default threshold |
//! |-------|----------|-------------------|
//! | exact_cache | context facts, configured known facts | 1.00 |
//! | generative_prior | injected [`EvidenceProvider`](fermi_core::traits::EvidenceProvider) | 0.70 |
//! | external_consensus | injected sample source + consensus extraction | 0.80 |
//! | law_lookup | definitional constants | 1.00 |
//! | behavioral | loss-aversion adjustment of an anchor | 0.60 |
//! | statistical_pattern | Pareto rule | 0.50 |
//! | analogy_benchmark | comparability-filtered benchmarks | 0.50 |
//! | decomposition | recursive Fermi search | 0.30 |
//! | boundary_constraint | physical/logical range | 0.00 |
//!
//! The first result meeting its layer's threshold wins. Everything else is
//! kept in the trace and in `evidence_rejected`.

pub mod controller;
pub mod strategies;
pub mod strategy;

pub use controller::{CascadeBuilder, CascadeController};
pub use strategy::{Strategy, StrategyRequest};
