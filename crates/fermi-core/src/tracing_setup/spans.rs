//! Span definitions: one span per recursive estimate and per decomposition search.

/// Create an estimate span.
#[macro_export]
macro_rules! estimate_span {
    ($query:expr, $depth:expr) => {
        tracing::info_span!("fermi.estimate", query = %$query, depth = $depth)
    };
}

/// Create a decomposition span.
#[macro_export]
macro_rules! decomposition_span {
    ($query:expr, $depth:expr) => {
        tracing::debug_span!("fermi.decomposition", query = %$query, depth = $depth)
    };
}

/// Create a consensus span.
#[macro_export]
macro_rules! consensus_span {
    ($sample_count:expr) => {
        tracing::debug_span!("fermi.consensus", sample_count = $sample_count)
    };
}

