//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so a coordinate or identifier problem keeps its identity all
//! the way up to the query layer.

use thiserror::Error;

use crate::FacilityId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon}): expected lat in [-90, 90] and lon in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("duplicate facility identifier {0:?}")]
    DuplicateIdentifier(FacilityId),

    #[error("facility identifier must not be empty")]
    EmptyIdentifier,
}

/// Shorthand result type for `fr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
