//! Router configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the router at startup.  Every field has a
//! default matching the behaviour of the hospital dataset deployment.

/// Reserved node name for the per-request query point.
pub const DEFAULT_QUERY_NODE: &str = "__query__";

/// Decimal digits kept on every stored edge weight and returned total.
pub const DEFAULT_WEIGHT_DECIMALS: u32 = 2;

/// Parameters that shape graph construction and ephemeral insertion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Fractional digits kept when storing edge weights and returning path
    /// totals.  Default: 2.
    pub weight_decimals: u32,

    /// Name of the transient query node.  Facilities may not use it.
    pub query_node: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            weight_decimals: DEFAULT_WEIGHT_DECIMALS,
            query_node:      DEFAULT_QUERY_NODE.to_owned(),
        }
    }
}

/// Top-level configuration for a facility router.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    pub graph: GraphConfig,

    /// Reject query points outside `[-90, 90] × [-180, 180]` with
    /// `InvalidCoordinate` before any graph work.  Default: `true`.
    /// Non-finite query points are rejected either way.  Facility
    /// coordinates are never range-checked.
    pub validate_coordinates: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            graph:                GraphConfig::default(),
            validate_coordinates: true,
        }
    }
}
