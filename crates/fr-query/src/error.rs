use thiserror::Error;

use fr_core::CoreError;
use fr_graph::GraphError;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl QueryError {
    /// Unknown facility or unreachable target: the request named something
    /// the graph cannot serve.  Maps to HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QueryError::Graph(GraphError::UnknownNode(_) | GraphError::NoPathFound { .. })
        )
    }

    /// Malformed request input such as a missing or out-of-range
    /// coordinate.  Maps to HTTP 400.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            QueryError::Core(CoreError::InvalidCoordinate { .. } | CoreError::EmptyIdentifier)
                | QueryError::Graph(GraphError::Core(CoreError::InvalidCoordinate { .. }))
        )
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
