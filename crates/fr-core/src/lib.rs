//! `fr-core`: foundational types for the facility router.
//!
//! This crate is a dependency of every other `fr-*` crate.  It has no `fr-*`
//! dependencies and minimal external ones (`rustc-hash` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`ids`]        | `NodeId`, `FacilityId`                                  |
//! | [`geo`]        | `GeoPoint`, haversine `distance_km`, `round_to`         |
//! | [`facility`]   | `Facility`, `FacilitySet`                               |
//! | [`config`]     | `GraphConfig`, `RouterConfig`                           |
//! | [`error`]      | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod facility;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GraphConfig, RouterConfig, DEFAULT_QUERY_NODE, DEFAULT_WEIGHT_DECIMALS};
pub use error::{CoreError, CoreResult};
pub use facility::{Facility, FacilitySet};
pub use geo::{distance_km, round_to, GeoPoint, EARTH_RADIUS_KM};
pub use ids::{FacilityId, NodeId};
