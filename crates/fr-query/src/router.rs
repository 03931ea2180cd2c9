//! The `FacilityRouter` and its request operations.

use std::sync::Arc;

use tracing::{debug, warn};

use fr_core::{FacilityId, FacilitySet, GeoPoint, NodeId, RouterConfig};
use fr_graph::{insert_query_point, Dijkstra, PathFinder, QueryGraph, WeightedGraph};

use crate::response::{
    lat_lon, DistanceMap, GraphSnapshot, LatLon, NearestResponse, PointRouteResponse,
    RouteResponse,
};
use crate::QueryResult;

// ── FacilityRouter ────────────────────────────────────────────────────────────

/// Shared, read-only routing state plus the request operations over it.
///
/// The base graph and facility set are built once and held behind `Arc`s.
/// Every request that involves an arbitrary point works on its own
/// [`QueryGraph`] copy, so a router can be shared across threads and
/// concurrent requests never observe each other's query node.
///
/// Create via [`RouterBuilder`][crate::RouterBuilder] or
/// [`FacilityRouter::new`].
#[derive(Debug, Clone)]
pub struct FacilityRouter<P: PathFinder = Dijkstra> {
    graph:      Arc<WeightedGraph>,
    facilities: Arc<FacilitySet>,
    /// Facility position per `NodeId` of the base graph.
    positions:  Arc<[GeoPoint]>,
    config:     RouterConfig,
    finder:     P,
}

impl FacilityRouter<Dijkstra> {
    /// Build a router over `facilities` with the default configuration and
    /// the [`Dijkstra`] engine.
    pub fn new(facilities: FacilitySet) -> QueryResult<Self> {
        crate::RouterBuilder::new(facilities).build()
    }
}

impl<P: PathFinder> FacilityRouter<P> {
    pub(crate) fn from_parts(
        graph:      WeightedGraph,
        facilities: FacilitySet,
        positions:  Vec<GeoPoint>,
        config:     RouterConfig,
        finder:     P,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            facilities: Arc::new(facilities),
            positions: positions.into(),
            config,
            finder,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    pub fn facilities(&self) -> &FacilitySet {
        &self.facilities
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Rounded distances from `start` to every reachable facility.
    pub fn distances_from(&self, start: &str) -> QueryResult<DistanceMap> {
        let from = self.graph.require(start)?;
        let table = self.finder.distances(&self.graph, from)?;
        debug!(start, reachable = table.reachable(), "computed distance table");
        Ok(table
            .named(&self.graph)
            .into_iter()
            .map(|(name, km)| (name.as_str().to_owned(), km))
            .collect())
    }

    /// Shortest route between two named facilities.
    pub fn route_between(&self, start: &str, end: &str) -> QueryResult<RouteResponse> {
        let from = self.graph.require(start)?;
        let to = self.graph.require(end)?;
        let route = self.finder.route(&self.graph, from, to)?;
        debug!(start, end, hops = route.hops(), km = route.total_km, "routed between facilities");

        Ok(RouteResponse {
            polyline: route.nodes.iter().map(|&n| lat_lon(self.position(n))).collect(),
            path:     route.names(&self.graph),
            total_km: route.total_km,
        })
    }

    /// Nearest facility to `point` and the route to it.
    ///
    /// The nearest facility is the one with the lightest direct edge from
    /// the query point; the returned route is the engine's shortest path to
    /// it.  An empty facility set is [`NoPathFound`].
    ///
    /// [`NoPathFound`]: fr_graph::GraphError::NoPathFound
    pub fn nearest_to(&self, point: GeoPoint) -> QueryResult<NearestResponse> {
        let query = self.query_graph(point)?;
        let route = query.route_to_nearest(&self.finder)?;
        debug!(%point, facility = %route.target, km = route.total_km, "nearest facility");

        Ok(NearestResponse {
            polyline: self.polyline_from(point, &route.stops)?,
            facility: route.target,
            path:     route.stops,
            total_km: route.total_km,
        })
    }

    /// [`nearest_to`](Self::nearest_to) from raw, possibly missing,
    /// coordinates.  A missing component is always
    /// [`InvalidCoordinate`](fr_core::CoreError::InvalidCoordinate).
    pub fn nearest_to_coords(&self, lat: Option<f64>, lon: Option<f64>) -> QueryResult<NearestResponse> {
        let point = match (lat, lon) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            (lat, lon) => GeoPoint::from_raw(lat, lon)?,
        };
        self.nearest_to(point)
    }

    /// Shortest route from `point` to the named facility `target`.
    pub fn route_from_point(&self, point: GeoPoint, target: &str) -> QueryResult<PointRouteResponse> {
        let query = self.query_graph(point)?;
        let route = query.route_to(&self.finder, target)?;
        debug!(%point, target, km = route.total_km, "routed from point");

        Ok(PointRouteResponse {
            polyline: self.polyline_from(point, &route.stops)?,
            facility: route.target,
            path:     route.stops,
            total_km: route.total_km,
        })
    }

    /// Name-keyed adjacency of the base graph.
    pub fn graph_snapshot(&self) -> GraphSnapshot {
        self.graph.to_adjacency_map()
    }

    /// Answer [`nearest_to`](Self::nearest_to) for each point, in input
    /// order.  With the `parallel` feature the batch runs on Rayon's thread
    /// pool.
    pub fn nearest_many(&self, points: &[GeoPoint]) -> Vec<QueryResult<NearestResponse>> {
        #[cfg(not(feature = "parallel"))]
        {
            points.iter().map(|&p| self.nearest_to(p)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            points.par_iter().map(|&p| self.nearest_to(p)).collect()
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn query_graph(&self, point: GeoPoint) -> QueryResult<QueryGraph> {
        // Non-finite components are always rejected; only the range check
        // is optional.
        let checked = if self.config.validate_coordinates {
            point.validate()
        } else {
            point.require_finite()
        };
        let point = checked.inspect_err(|_| warn!(%point, "rejected query point"))?;
        Ok(insert_query_point(&self.graph, &self.facilities, point, &self.config.graph)?)
    }

    fn position(&self, node: NodeId) -> GeoPoint {
        self.positions[node.index()]
    }

    fn polyline_from(&self, origin: GeoPoint, stops: &[FacilityId]) -> QueryResult<Vec<LatLon>> {
        let mut line = Vec::with_capacity(stops.len() + 1);
        line.push(lat_lon(origin));
        for stop in stops {
            let node = self.graph.require(stop.as_str())?;
            line.push(lat_lon(self.position(node)));
        }
        Ok(line)
    }
}
