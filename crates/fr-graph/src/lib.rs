//! `fr-graph`: weighted facility graphs, shortest paths, and query points.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `WeightedGraph` (CSR), `GraphBuilder`, `build_graph`          |
//! | [`router`] | `PathFinder` trait, `Dijkstra`, `Route`, `shortest_path`      |
//! | [`query`]  | `insert_query_point`, `QueryGraph`, `QueryRoute`              |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize` on `Route` and `QueryRoute`.            |

pub mod error;
pub mod graph;
pub mod query;
pub mod router;


pub use error::{GraphError, GraphResult};
pub use graph::{build_graph, GraphBuilder, WeightedGraph};
pub use query::{insert_query_point, QueryGraph, QueryRoute};
pub use router::{shortest_path, Dijkstra, DistanceTable, PathFinder, Route, SearchOutcome};
