//! `fr-query`: request-level entry points for the facility router.
//!
//! # Request model
//!
//! ```text
//! startup:   FacilitySet ──RouterBuilder::build──► FacilityRouter
//!                          (complete graph, Arc-shared, never mutated)
//!
//! per request with a query point:
//!   ① Validate: reject out-of-range or missing coordinates.
//!   ② Insert  : copy the base graph and add the reserved query node.
//!   ③ Search  : nearest facility and/or shortest route on the copy.
//!   ④ Respond : strip the query node, attach the coordinate polyline.
//! ```
//!
//! Requests between named facilities (`route_between`, `distances_from`)
//! run directly on the shared base graph.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs `nearest_many` on Rayon's thread pool.            |
//! | `serde`    | Derives `Serialize` on the response types.             |

pub mod builder;
pub mod error;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests;

pub use builder::RouterBuilder;
pub use error::{QueryError, QueryResult};
pub use response::{
    DistanceMap, GraphSnapshot, LatLon, NearestResponse, PointRouteResponse, RouteResponse,
};
pub use router::FacilityRouter;
