//! Storage backends for case records
//!
//! Records are persisted through the `CaseStore` trait. `JsonFileStore`
//! keeps one directory per case with a pretty-printed JSON summary;
//! `SqliteStore` keeps every case in a single database file.

mod json;
mod sqlite;
mod traits;

pub use json::JsonFileStore;
pub use sqlite::SqliteStore;
pub use traits::{image_file_name, CaseStore, OpenStore, StorageError, StorageResult};
