//! Request results.
//!
//! With the `serde` feature these serialize to the JSON shape of the
//! hospital-finder API: the facility under `nearest_hospital` or `hospital`,
//! the coordinate polyline under `route` as `[lat, lon]` pairs, facility
//! names under `path`, and the rounded total under `distance`.

use std::collections::BTreeMap;

use fr_core::{FacilityId, GeoPoint};

/// One `[lat, lon]` vertex of a route polyline.
pub type LatLon = [f64; 2];

#[inline]
pub(crate) fn lat_lon(p: GeoPoint) -> LatLon {
    [p.lat, p.lon]
}

/// Nearest facility to a query point, with the route to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NearestResponse {
    #[cfg_attr(feature = "serde", serde(rename = "nearest_hospital"))]
    pub facility: FacilityId,
    /// Query point first, then every facility on the path.
    #[cfg_attr(feature = "serde", serde(rename = "route"))]
    pub polyline: Vec<LatLon>,
    pub path:     Vec<FacilityId>,
    #[cfg_attr(feature = "serde", serde(rename = "distance"))]
    pub total_km: f64,
}

/// Route between two named facilities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteResponse {
    /// Start and end included.
    #[cfg_attr(feature = "serde", serde(rename = "route"))]
    pub polyline: Vec<LatLon>,
    pub path:     Vec<FacilityId>,
    #[cfg_attr(feature = "serde", serde(rename = "distance"))]
    pub total_km: f64,
}

/// Route from a query point to a caller-chosen facility.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointRouteResponse {
    #[cfg_attr(feature = "serde", serde(rename = "hospital"))]
    pub facility: FacilityId,
    /// Query point first, then every facility on the path.
    #[cfg_attr(feature = "serde", serde(rename = "route"))]
    pub polyline: Vec<LatLon>,
    pub path:     Vec<FacilityId>,
    #[cfg_attr(feature = "serde", serde(rename = "distance"))]
    pub total_km: f64,
}

/// Rounded distance from one facility to every reachable facility, keyed by
/// name.  The source maps to `0.0`.
pub type DistanceMap = BTreeMap<String, f64>;

/// Name-keyed adjacency listing of the whole graph.
pub type GraphSnapshot = BTreeMap<String, BTreeMap<String, f64>>;
