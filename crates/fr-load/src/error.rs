use thiserror::Error;

use fr_core::CoreError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("facility parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Facility(#[from] CoreError),
}

pub type LoadResult<T> = Result<T, LoadError>;
