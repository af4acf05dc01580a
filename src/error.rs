//! Error taxonomy
//!
//! Every error is local to one tick: none of them stops a running driver.

use thiserror::Error;

use crate::sim::JointId;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum PintographError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Linkage error: {0}")]
    Solve(#[from] SolveError),
}

/// Malformed or missing host inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must contain {expected} entries, got {actual}")]
    WrongCardinality {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two rod constraints admit no real intersection.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Constraint circles do not meet (triangle inequality violated)
    #[error("circles do not meet (anchor distance {distance}, rods {l1} and {l2})")]
    Infeasible { distance: f64, l1: f64, l2: f64 },

    /// Anchors coincide, so the intersection is undefined
    #[error("anchors coincide")]
    Degenerate,
}

/// A joint of the chain could not be placed at this instant.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("joint {joint} unsolvable: {source}")]
pub struct SolveError {
    pub joint: JointId,
    #[source]
    pub source: GeometryError,
}
