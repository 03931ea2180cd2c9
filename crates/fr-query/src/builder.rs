//! Fluent builder for constructing a [`FacilityRouter`].

use tracing::info;

use fr_core::{FacilitySet, RouterConfig};
use fr_graph::{Dijkstra, PathFinder, WeightedGraph};

use crate::{FacilityRouter, QueryResult};

/// Fluent builder for [`FacilityRouter<P>`].
///
/// # Required inputs
///
/// - [`FacilitySet`]: the facilities to route between, e.g. from
///   `fr_load::load_facilities`.
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                  |
/// |----------------|--------------------------|
/// | `.config(c)`   | `RouterConfig::default()`|
/// | `.finder(p)`   | [`Dijkstra`]             |
///
/// # Example
///
/// ```rust
/// use fr_core::{FacilitySet, GeoPoint, RouterConfig};
/// use fr_query::RouterBuilder;
///
/// let facilities = FacilitySet::from_records([
///     ("North", GeoPoint::new(1.0, 0.0)),
///     ("South", GeoPoint::new(-1.0, 0.0)),
/// ]).unwrap();
///
/// let router = RouterBuilder::new(facilities)
///     .config(RouterConfig::default())
///     .build()
///     .unwrap();
///
/// let nearest = router.nearest_to(GeoPoint::new(0.9, 0.1)).unwrap();
/// assert_eq!(nearest.facility, "North");
/// ```
pub struct RouterBuilder<P: PathFinder = Dijkstra> {
    facilities: FacilitySet,
    config:     RouterConfig,
    finder:     P,
}

impl RouterBuilder<Dijkstra> {
    /// Create a builder with the required facility set.
    pub fn new(facilities: FacilitySet) -> Self {
        Self {
            facilities,
            config: RouterConfig::default(),
            finder: Dijkstra,
        }
    }
}

impl<P: PathFinder> RouterBuilder<P> {
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the shortest-path engine.
    pub fn finder<Q: PathFinder>(self, finder: Q) -> RouterBuilder<Q> {
        RouterBuilder {
            facilities: self.facilities,
            config:     self.config,
            finder,
        }
    }

    /// Build the complete base graph and return a ready-to-query router.
    ///
    /// Fails with `ReservedIdentifier` if a facility uses the configured
    /// query-node name.
    pub fn build(self) -> QueryResult<FacilityRouter<P>> {
        let graph = WeightedGraph::complete(&self.facilities, &self.config.graph)?;

        // The complete graph holds exactly the facility set, so every node
        // name resolves.
        let positions = graph
            .names()
            .iter()
            .filter_map(|name| self.facilities.position(name.as_str()))
            .collect::<Vec<_>>();
        debug_assert_eq!(positions.len(), graph.node_count());

        info!(
            facilities = self.facilities.len(),
            edges = graph.edge_count(),
            "facility router ready"
        );

        Ok(FacilityRouter::from_parts(
            graph,
            self.facilities,
            positions,
            self.config,
            self.finder,
        ))
    }
}
