//! Weighted facility graph and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slices:
//!
//! ```text
//! edge_to       [ node_out_start[n] .. node_out_start[n+1] ]
//! edge_weight_km[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Within a row, edges are sorted by destination `NodeId`, so weight lookup
//! is a binary search and iteration order is deterministic.
//!
//! # Node numbering
//!
//! `build()` renumbers nodes in lexicographic order of their names.  Two
//! builders fed the same nodes and edges in different orders therefore
//! produce identical graphs, and "lowest `NodeId`" means "smallest name"
//! wherever a tie has to be broken.
//!
//! # Weights
//!
//! Every stored weight is rounded to `weight_decimals` fractional digits at
//! insertion time.  Shortest-path search runs on the rounded values.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::debug;

use fr_core::{round_to, FacilityId, FacilitySet, GraphConfig, NodeId};

use crate::{GraphError, GraphResult};

// ── WeightedGraph ─────────────────────────────────────────────────────────────

/// Directed weighted graph in CSR format, keyed by facility name.
///
/// Immutable once built.  Share it across threads behind an `Arc`; per-query
/// augmentation goes through [`insert_query_point`](crate::insert_query_point),
/// which builds a new value and never touches this one.
#[derive(Clone, Debug)]
pub struct WeightedGraph {
    /// Name of each node.  Indexed by `NodeId`.
    pub(crate) names: Vec<FacilityId>,

    /// Reverse of `names`.
    pub(crate) index: FxHashMap<FacilityId, NodeId>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub(crate) node_out_start: Vec<u32>,

    /// Destination node of each edge.
    pub(crate) edge_to: Vec<NodeId>,

    /// Rounded edge weight in kilometres.
    pub(crate) edge_weight_km: Vec<f64>,

    pub(crate) weight_decimals: u32,
}

impl WeightedGraph {
    /// Construct an empty graph with no nodes or edges.
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    /// Build the complete great-circle graph over `facilities`.
    ///
    /// Every unordered pair of distinct facilities gets one haversine
    /// distance, rounded to `config.weight_decimals` and stored in both
    /// directions, so `weight(a, b) == weight(b, a)` exactly.
    ///
    /// Fails with [`GraphError::ReservedIdentifier`] if a facility uses the
    /// query-node name.
    pub fn complete(facilities: &FacilitySet, config: &GraphConfig) -> GraphResult<Self> {
        let n = facilities.len();
        let mut b = GraphBuilder::with_capacity(config, n, n.saturating_sub(1) * n);

        let nodes = facilities
            .iter()
            .map(|f| Ok((b.add_node(f.id.clone())?, f.pos)))
            .collect::<GraphResult<Vec<_>>>()?;

        for (i, &(a, pos_a)) in nodes.iter().enumerate() {
            for &(c, pos_c) in &nodes[i + 1..] {
                b.add_edge(a, c, pos_a.distance_km(pos_c))?;
            }
        }

        let graph = b.build();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built complete facility graph"
        );
        Ok(graph)
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fractional digits kept on weights and returned totals.
    pub fn weight_decimals(&self) -> u32 {
        self.weight_decimals
    }

    // ── Names ─────────────────────────────────────────────────────────────

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Like [`node_id`](Self::node_id) but fails with
    /// [`GraphError::UnknownNode`].
    pub fn require(&self, name: &str) -> GraphResult<NodeId> {
        self.node_id(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name of `node`.
    ///
    /// # Panics
    /// Panics if `node` was not issued by this graph.
    pub fn name(&self, node: NodeId) -> &FacilityId {
        &self.names[node.index()]
    }

    /// All node names in `NodeId` order.
    pub fn names(&self) -> &[FacilityId] {
        &self.names
    }

    #[inline]
    pub(crate) fn has_node(&self, node: NodeId) -> bool {
        node.index() < self.names.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    #[inline]
    fn row(&self, node: NodeId) -> std::ops::Range<usize> {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Outgoing `(neighbor, weight_km)` pairs of `node`, in ascending
    /// neighbor order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let row = self.row(node);
        self.edge_to[row.clone()]
            .iter()
            .copied()
            .zip(self.edge_weight_km[row].iter().copied())
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.row(node).len()
    }

    /// Weight of the edge `from → to`, if present.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if !self.has_node(from) {
            return None;
        }
        let row = self.row(from);
        self.edge_to[row.clone()]
            .binary_search(&to)
            .ok()
            .map(|i| self.edge_weight_km[row.start + i])
    }

    /// Name-keyed form of [`weight`](Self::weight).
    pub fn weight_between(&self, from: &str, to: &str) -> Option<f64> {
        self.weight(self.node_id(from)?, self.node_id(to)?)
    }

    /// Export as an ordered `name → (neighbor → km)` map.
    ///
    /// Every node has an entry, including nodes with no edges.
    pub fn to_adjacency_map(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        (0..self.node_count())
            .map(|i| {
                let node = NodeId(i as u32);
                let neighbors: BTreeMap<String, f64> = self
                    .out_edges(node)
                    .map(|(to, w)| (self.name(to).to_string(), w))
                    .collect();
                (self.name(node).to_string(), neighbors)
            })
            .collect()
    }
}

impl Default for WeightedGraph {
    fn default() -> Self {
        Self::empty()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`WeightedGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes and edges may be added in any order.  `build()` renumbers nodes by
/// name, sorts edges, and constructs the CSR arrays.  If the same directed
/// edge is added more than once, the lightest weight wins.
///
/// # Example
///
/// ```
/// use fr_core::FacilityId;
/// use fr_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_node(FacilityId::new("A").unwrap()).unwrap();
/// let c = b.add_node(FacilityId::new("C").unwrap()).unwrap();
/// b.add_edge(a, c, 12.3456).unwrap();
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// assert_eq!(g.weight_between("A", "C"), Some(12.35));
/// ```
pub struct GraphBuilder {
    names:           Vec<FacilityId>,
    index:           FxHashMap<FacilityId, NodeId>,
    raw_edges:       Vec<RawEdge>,
    weight_decimals: u32,
    reserved:        String,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    weight: f64,
}

impl GraphBuilder {
    /// Builder with the default [`GraphConfig`].
    pub fn new() -> Self {
        Self::with_config(&GraphConfig::default())
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self::with_capacity(config, 0, 0)
    }

    /// Pre-allocate for the expected number of nodes and directed edges.
    pub fn with_capacity(config: &GraphConfig, nodes: usize, edges: usize) -> Self {
        Self {
            names:           Vec::with_capacity(nodes),
            index:           FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:       Vec::with_capacity(edges),
            weight_decimals: config.weight_decimals,
            reserved:        config.query_node.clone(),
        }
    }

    /// Add a node and return its provisional `NodeId`.
    ///
    /// Provisional ids are only valid for `add_edge` calls on this builder;
    /// the built graph renumbers nodes by name.
    pub fn add_node(&mut self, name: FacilityId) -> GraphResult<NodeId> {
        if name.as_str() == self.reserved {
            return Err(GraphError::ReservedIdentifier(name.to_string()));
        }
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateIdentifier(name));
        }
        let id = node_id_at(self.names.len())?;
        self.index.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Provisional id of a node added earlier.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Add a **directed** edge.  `weight_km` is rounded before storage.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight_km: f64) -> GraphResult<()> {
        let weight = self.check_edge(from, to, weight_km)?;
        self.raw_edges.push(RawEdge { from, to, weight });
        Ok(())
    }

    /// Add edges in **both directions** with one rounded weight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight_km: f64) -> GraphResult<()> {
        let weight = self.check_edge(a, b, weight_km)?;
        self.raw_edges.push(RawEdge { from: a, to: b, weight });
        self.raw_edges.push(RawEdge { from: b, to: a, weight });
        Ok(())
    }

    fn check_edge(&self, from: NodeId, to: NodeId, weight_km: f64) -> GraphResult<f64> {
        for node in [from, to] {
            if node.index() >= self.names.len() {
                return Err(GraphError::UnknownNode(node.to_string()));
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop(self.names[from.index()].to_string()));
        }
        if !weight_km.is_finite() || weight_km < 0.0 {
            return Err(GraphError::InvalidWeight {
                from:   self.names[from.index()].to_string(),
                to:     self.names[to.index()].to_string(),
                weight: weight_km,
            });
        }
        Ok(round_to(weight_km, self.weight_decimals))
    }

    pub fn node_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`WeightedGraph`].
    ///
    /// Time complexity: O(N log N + E log E).
    pub fn build(self) -> WeightedGraph {
        let node_count = self.names.len();

        // Renumber nodes in name order.
        let mut order: Vec<usize> = (0..node_count).collect();
        order.sort_unstable_by(|&a, &b| self.names[a].cmp(&self.names[b]));
        let mut remap = vec![NodeId::INVALID; node_count];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = NodeId(new as u32);
        }
        let names: Vec<FacilityId> = order.iter().map(|&old| self.names[old].clone()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), NodeId(i as u32)))
            .collect();

        // Sort edges by (source, destination, weight) and keep the lightest
        // of any parallel edges.
        let mut raw: Vec<RawEdge> = self
            .raw_edges
            .into_iter()
            .map(|e| RawEdge { from: remap[e.from.index()], to: remap[e.to.index()], weight: e.weight })
            .collect();
        raw.sort_unstable_by(|a, b| {
            (a.from, a.to)
                .cmp(&(b.from, b.to))
                .then(a.weight.total_cmp(&b.weight))
        });
        raw.dedup_by(|later, kept| later.from == kept.from && later.to == kept.to);

        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_weight_km: Vec<f64>    = raw.iter().map(|e| e.weight).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_to.len());

        WeightedGraph {
            names,
            index,
            node_out_start,
            edge_to,
            edge_weight_km,
            weight_decimals: self.weight_decimals,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Id for the node at dense position `index`.  `NodeId::INVALID` is never
/// issued, so the last usable position is `u32::MAX - 1`.
pub(crate) fn node_id_at(index: usize) -> GraphResult<NodeId> {
    match NodeId::try_from(index) {
        Ok(id) if id != NodeId::INVALID => Ok(id),
        _ => Err(GraphError::CapacityExceeded {
            what:  "nodes",
            count: index.saturating_add(1),
        }),
    }
}

/// Build the complete graph over `facilities` with the default config.
///
/// Shorthand for [`WeightedGraph::complete`].
pub fn build_graph(facilities: &FacilitySet) -> GraphResult<WeightedGraph> {
    WeightedGraph::complete(facilities, &GraphConfig::default())
}
