//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `fr-query` calls the engine through the [`PathFinder`] trait, so callers
//! can swap in another label-setting variant without touching the request
//! layer.  The default [`Dijkstra`] is sufficient for complete graphs of a
//! few thousand facilities.
//!
//! # Numeric semantics
//!
//! Relaxation sums the stored (already rounded) edge weights without further
//! rounding and uses strict `<`, so an equal-cost alternative never replaces
//! the first predecessor found.  Only the totals handed back to the caller
//! are rounded, to the graph's `weight_decimals`.
//!
//! # Tie-breaking
//!
//! Heap entries with equal tentative distance pop in ascending `NodeId`
//! order.  Graphs number their nodes by name, so this is lexicographic
//! identifier order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fr_core::{round_to, FacilityId, NodeId};

use crate::graph::WeightedGraph;
use crate::{GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a point-to-point query: nodes in travel order, start and
/// end included, and the rounded total distance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub total_km: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Resolve node ids to names against the graph that produced the route.
    pub fn names(&self, graph: &WeightedGraph) -> Vec<FacilityId> {
        self.nodes.iter().map(|&n| graph.name(n).clone()).collect()
    }
}

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// Rounded distances from one source to every node, as produced by a search
/// without a target.  Unreachable nodes have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    pub source: NodeId,
    distances: Vec<Option<f64>>,
}

impl DistanceTable {
    /// Distance to `node`, or `None` if it is unreachable or unknown.
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.distances.get(node.index()).copied().flatten()
    }

    /// Reachable `(node, km)` pairs in `NodeId` order.  Includes the source
    /// at `0.0`.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (NodeId(i as u32), d)))
    }

    /// Number of reachable nodes, source included.
    pub fn reachable(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Reachable `(name, km)` pairs in name order.
    pub fn named(&self, graph: &WeightedGraph) -> Vec<(FacilityId, f64)> {
        self.iter().map(|(n, d)| (graph.name(n).clone(), d)).collect()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-source shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one engine can serve concurrent
/// requests.
pub trait PathFinder: Send + Sync {
    /// Minimum-distance route from `from` to `to`.
    ///
    /// `from == to` yields `[from]` at distance `0.0`.  An unreachable `to`
    /// is [`GraphError::NoPathFound`], never a degenerate route.
    fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> GraphResult<Route>;

    /// Distances from `from` to every reachable node.
    fn distances(&self, graph: &WeightedGraph, from: NodeId) -> GraphResult<DistanceTable>;
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Label-setting Dijkstra over the CSR graph with a binary min-heap.
///
/// With a target, the search stops as soon as the target is popped; labels
/// of nodes not yet settled at that point are left incomplete and are never
/// exposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl PathFinder for Dijkstra {
    fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> GraphResult<Route> {
        check_node(graph, from)?;
        check_node(graph, to)?;

        if from == to {
            return Ok(Route { nodes: vec![from], total_km: 0.0 });
        }

        let labels = search(graph, from, Some(to));
        let total = labels.dist[to.index()];
        if total.is_infinite() {
            return Err(GraphError::NoPathFound {
                from: graph.name(from).to_string(),
                to:   graph.name(to).to_string(),
            });
        }

        Ok(Route {
            nodes:    reconstruct(&labels.prev, from, to),
            total_km: round_to(total, graph.weight_decimals()),
        })
    }

    fn distances(&self, graph: &WeightedGraph, from: NodeId) -> GraphResult<DistanceTable> {
        check_node(graph, from)?;

        let decimals = graph.weight_decimals();
        let labels = search(graph, from, None);
        let distances = labels
            .dist
            .into_iter()
            .map(|d| d.is_finite().then(|| round_to(d, decimals)))
            .collect();

        Ok(DistanceTable { source: from, distances })
    }
}

// ── Name-level entry point ────────────────────────────────────────────────────

/// Outcome of [`shortest_path`]: a route when a target was given, a
/// distance table otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Route(Route),
    Distances(DistanceTable),
}

/// Run [`Dijkstra`] from `start`, either to `end` or to every node.
///
/// Fails with [`GraphError::UnknownNode`] if either name is missing.
pub fn shortest_path(
    graph: &WeightedGraph,
    start: &str,
    end:   Option<&str>,
) -> GraphResult<SearchOutcome> {
    let from = graph.require(start)?;
    match end {
        Some(end) => {
            let to = graph.require(end)?;
            Dijkstra.route(graph, from, to).map(SearchOutcome::Route)
        }
        None => Dijkstra.distances(graph, from).map(SearchOutcome::Distances),
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn check_node(graph: &WeightedGraph, node: NodeId) -> GraphResult<()> {
    if graph.has_node(node) {
        Ok(())
    } else {
        Err(GraphError::UnknownNode(node.to_string()))
    }
}

struct Labels {
    /// Best known unrounded distance; `INFINITY` for unreached nodes.
    dist: Vec<f64>,
    /// Predecessor on the best known path; `NodeId::INVALID` if none.
    prev: Vec<NodeId>,
}

fn search(graph: &WeightedGraph, from: NodeId, target: Option<NodeId>) -> Labels {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry::new(from, 0.0));

    while let Some(QueueEntry { cost: FloatOrd(cost), node }) = heap.pop() {
        if Some(node) == target {
            break;
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (neighbor, weight) in graph.out_edges(node) {
            let next = cost + weight;
            if next < dist[neighbor.index()] {
                dist[neighbor.index()] = next;
                prev[neighbor.index()] = node;
                heap.push(QueueEntry::new(neighbor, next));
            }
        }
    }

    Labels { dist, prev }
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        debug_assert_ne!(cur, NodeId::INVALID, "broken predecessor chain");
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cost: FloatOrd,
    node: NodeId,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self { cost: FloatOrd(cost), node }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the cheapest entry, and
        // the lowest NodeId among equal costs.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
