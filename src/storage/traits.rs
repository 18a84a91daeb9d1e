//! Storage trait definitions

use crate::case::{CaseName, CaseRecord};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File name of a case's application image
pub fn image_file_name(name: &CaseName) -> String {
    format!("appl_image_{name}.png")
}

/// Trait for case storage backends
///
/// Implementations must be thread-safe (Send + Sync) so a workbench can be
/// shared between threads.
pub trait CaseStore: Send + Sync {
    // === Record Operations ===

    /// Create or replace a case record
    fn save_case(&self, name: &CaseName, record: &CaseRecord) -> StorageResult<()>;

    /// Load a case record by name
    fn load_case(&self, name: &CaseName) -> StorageResult<Option<CaseRecord>>;

    /// Delete a case together with its image
    fn delete_case(&self, name: &CaseName) -> StorageResult<bool>;

    /// List all stored case names
    fn list_cases(&self) -> StorageResult<Vec<CaseName>>;

    // === Image Operations ===

    /// Store the application image; returns the reference kept in the record
    fn save_image(&self, name: &CaseName, bytes: &[u8]) -> StorageResult<String>;

    fn load_image(&self, name: &CaseName) -> StorageResult<Option<Vec<u8>>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: CaseStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
