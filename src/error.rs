// src/error.rs
use thiserror::Error;

/// Fatal initialization failures. The engine refuses to serve queries
/// without a loaded catalog, so these surface to the caller instead of
/// being degraded around.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("model decode error: {0}")]
    Model(#[from] bincode::Error),

    #[error("dataset contains no usable rows")]
    EmptyDataset,
}
