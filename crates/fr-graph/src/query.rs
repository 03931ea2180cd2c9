//! Ephemeral query-point insertion.
//!
//! A query point is an arbitrary coordinate that is not a facility.  To run
//! the shortest-path engine from it, [`insert_query_point`] builds a **new**
//! graph value: the base adjacency copied row by row, one reserved node for
//! the query point, an edge from it to every facility and a reverse edge
//! from every facility back to it.  The base graph is only ever borrowed
//! immutably, so concurrent requests each hold a private copy and never see
//! one another's query node.
//!
//! The reserved node is appended after all facility nodes, so it has the
//! highest `NodeId` in the copy and the facility numbering is unchanged.

use tracing::trace;

use fr_core::{round_to, FacilityId, FacilitySet, GeoPoint, GraphConfig, NodeId};

use crate::graph::{node_id_at, WeightedGraph};
use crate::router::PathFinder;
use crate::{GraphError, GraphResult};

/// A private copy of a base graph augmented with one query node.
#[derive(Debug, Clone)]
pub struct QueryGraph {
    graph:  WeightedGraph,
    query:  NodeId,
    origin: GeoPoint,
}

/// Route from a query point to a facility.  The reserved query node is not
/// part of `stops`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryRoute {
    pub origin: GeoPoint,
    pub target: FacilityId,
    /// Facilities visited after leaving the query point, ending at `target`.
    pub stops: Vec<FacilityId>,
    pub total_km: f64,
}

/// Copy `base` and insert a node for `query`, connected to every facility in
/// `facilities` by its rounded great-circle distance.
///
/// Base nodes absent from `facilities` get no edge to the query node.  Query
/// edges are rounded to `base.weight_decimals()`, so the copy has a single
/// precision; only `config.query_node` is taken from `config`.
///
/// # Errors
///
/// - [`GraphError::UnknownNode`] if a facility is not a node of `base`.
/// - [`GraphError::ReservedIdentifier`] if `base` already has a node named
///   `config.query_node`.
/// - [`GraphError::CapacityExceeded`] if the copy would not fit 32-bit
///   node or edge indices.
pub fn insert_query_point(
    base:       &WeightedGraph,
    facilities: &FacilitySet,
    query:      GeoPoint,
    config:     &GraphConfig,
) -> GraphResult<QueryGraph> {
    if base.contains(&config.query_node) {
        return Err(GraphError::ReservedIdentifier(config.query_node.clone()));
    }
    let query_name = FacilityId::new(&config.query_node)?;

    let n = base.node_count();
    let q = node_id_at(n)?;
    let decimals = base.weight_decimals();

    // Weight from the query point to each base node, if it is a facility.
    let mut to_query: Vec<Option<f64>> = vec![None; n];
    for facility in facilities {
        let node = base.require(facility.id.as_str())?;
        let km = round_to(query.distance_km(facility.pos), decimals);
        to_query[node.index()] = Some(km);
    }
    let query_degree = to_query.iter().filter(|w| w.is_some()).count();

    // ── Copy CSR rows, appending the reverse edge to each ──────────────────
    let edges = base.edge_count() + 2 * query_degree;
    if u32::try_from(edges).is_err() {
        return Err(GraphError::CapacityExceeded { what: "edges", count: edges });
    }
    let mut node_out_start = Vec::with_capacity(n + 2);
    let mut edge_to        = Vec::with_capacity(edges);
    let mut edge_weight_km = Vec::with_capacity(edges);
    node_out_start.push(0u32);

    for (i, reverse) in to_query.iter().enumerate() {
        let node = NodeId(i as u32);
        for (to, w) in base.out_edges(node) {
            edge_to.push(to);
            edge_weight_km.push(w);
        }
        if let Some(w) = *reverse {
            edge_to.push(q);
            edge_weight_km.push(w);
        }
        node_out_start.push(edge_to.len() as u32);
    }

    // ── Query row, in ascending facility order ─────────────────────────────
    for (i, w) in to_query.iter().enumerate() {
        if let Some(w) = *w {
            edge_to.push(NodeId(i as u32));
            edge_weight_km.push(w);
        }
    }
    node_out_start.push(edge_to.len() as u32);

    let mut names = base.names.clone();
    names.push(query_name.clone());
    let mut index = base.index.clone();
    index.insert(query_name, q);

    trace!(%query, edges = query_degree, "inserted query point into private graph copy");

    Ok(QueryGraph {
        graph: WeightedGraph {
            names,
            index,
            node_out_start,
            edge_to,
            edge_weight_km,
            weight_decimals: decimals,
        },
        query: q,
        origin: query,
    })
}

impl QueryGraph {
    /// The augmented graph, query node included.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    pub fn query_node(&self) -> NodeId {
        self.query
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// The facility with the lightest edge from the query node.
    ///
    /// Ties go to the lowest `NodeId`, i.e. the lexicographically smallest
    /// name.  With no facilities at all this is
    /// [`GraphError::NoPathFound`].
    pub fn nearest(&self) -> GraphResult<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for (node, w) in self.graph.out_edges(self.query) {
            if best.is_none_or(|(_, best_w)| w < best_w) {
                best = Some((node, w));
            }
        }
        best.ok_or_else(|| GraphError::NoPathFound {
            from: self.graph.name(self.query).to_string(),
            to:   "<any facility>".to_owned(),
        })
    }

    /// Name-resolved form of [`nearest`](Self::nearest).
    pub fn nearest_facility(&self) -> GraphResult<(FacilityId, f64)> {
        let (node, km) = self.nearest()?;
        Ok((self.graph.name(node).clone(), km))
    }

    /// Shortest route from the query point to `target`, with the query node
    /// stripped from the returned stops.
    pub fn route_to<P: PathFinder>(&self, finder: &P, target: &str) -> GraphResult<QueryRoute> {
        let to = self.graph.require(target)?;
        if to == self.query {
            return Err(GraphError::UnknownNode(target.to_owned()));
        }
        let route = finder.route(&self.graph, self.query, to)?;

        let stops = route
            .nodes
            .iter()
            .filter(|&&n| n != self.query)
            .map(|&n| self.graph.name(n).clone())
            .collect();

        Ok(QueryRoute {
            origin:   self.origin,
            target:   self.graph.name(to).clone(),
            stops,
            total_km: route.total_km,
        })
    }

    /// [`nearest`](Self::nearest) followed by [`route_to`](Self::route_to).
    pub fn route_to_nearest<P: PathFinder>(&self, finder: &P) -> GraphResult<QueryRoute> {
        let (node, _) = self.nearest()?;
        let name = self.graph.name(node).clone();
        self.route_to(finder, name.as_str())
    }

    /// Drop the augmentation and return the private graph copy.
    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }
}
