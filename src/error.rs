//! Crate-level error type

use crate::config::ConfigError;
use crate::graph::GraphError;
use crate::storage::StorageError;
use crate::table::TableError;
use thiserror::Error;

/// Errors surfaced by case sessions and the workbench
#[derive(Debug, Error)]
pub enum ClaimGraphError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Malformed case record: {0}")]
    Record(#[from] serde_json::Error),

    /// A stage was invoked before the record field it reads exists
    #[error("Record has no \"{0}\" yet; run the previous stage first")]
    MissingStage(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result type for case operations
pub type ClaimGraphResult<T> = Result<T, ClaimGraphError>;
