//! Feature table: per-claim feature columns and their flattened row form

mod feature_table;
mod flat;

pub use feature_table::{is_back_reference, FeatureColumn, FeatureTable, BACK_REFERENCE_PREFIXES};
pub use flat::{FeatureRow, FlatTable};

use crate::claim::ClaimId;
use thiserror::Error;

/// Errors from manual table edits
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Claim column not found: {0}")]
    ColumnNotFound(ClaimId),

    #[error("Row out of range: {0}")]
    RowOutOfRange(usize),
}
