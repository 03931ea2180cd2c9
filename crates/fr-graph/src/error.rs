//! Graph-subsystem error type.

use thiserror::Error;

use fr_core::{CoreError, FacilityId};

/// Errors produced by `fr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0:?} not found in graph")]
    UnknownNode(String),

    #[error("no path from {from:?} to {to:?}")]
    NoPathFound { from: String, to: String },

    #[error("duplicate node {0:?}")]
    DuplicateIdentifier(FacilityId),

    #[error("node name {0:?} is reserved for the query point")]
    ReservedIdentifier(String),

    #[error("self-loop on node {0:?}")]
    SelfLoop(String),

    #[error("invalid weight {weight} on edge {from:?} -> {to:?}: must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("{count} {what} exceed the 32-bit index space of one graph")]
    CapacityExceeded { what: &'static str, count: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GraphResult<T> = Result<T, GraphError>;
