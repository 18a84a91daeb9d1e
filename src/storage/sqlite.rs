//! SQLite storage backend

use super::traits::{image_file_name, CaseStore, OpenStore, StorageResult};
use crate::case::{CaseName, CaseRecord};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed case store
///
/// One table holds the records as JSON text, a second one the image blobs.
/// Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                name TEXT PRIMARY KEY,
                record_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS images (
                name TEXT PRIMARY KEY,
                bytes BLOB NOT NULL,
                FOREIGN KEY (name) REFERENCES cases(name) ON DELETE CASCADE
            );

            PRAGMA foreign_keys = ON;
            "#,
        )?;
        Ok(())
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl CaseStore for SqliteStore {
    fn save_case(&self, name: &CaseName, record: &CaseRecord) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let record_json = serde_json::to_string(record)?;

        conn.execute(
            r#"
            INSERT INTO cases (name, record_json, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                record_json = excluded.record_json,
                updated_at = excluded.updated_at
            "#,
            params![name.as_str(), record_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn load_case(&self, name: &CaseName) -> StorageResult<Option<CaseRecord>> {
        let conn = self.conn.lock().unwrap();
        let record_json: Option<String> = conn
            .query_row(
                "SELECT record_json FROM cases WHERE name = ?1",
                params![name.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match record_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn delete_case(&self, name: &CaseName) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute("DELETE FROM cases WHERE name = ?1", params![name.as_str()])?;
        Ok(rows > 0)
    }

    fn list_cases(&self) -> StorageResult<Vec<CaseName>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT name FROM cases ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|r| r.map(CaseName::from_string))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn save_image(&self, name: &CaseName, bytes: &[u8]) -> StorageResult<String> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO images (name, bytes) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET bytes = excluded.bytes
            "#,
            params![name.as_str(), bytes],
        )?;
        Ok(image_file_name(name))
    }

    fn load_image(&self, name: &CaseName) -> StorageResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap();
        let bytes = conn
            .query_row(
                "SELECT bytes FROM images WHERE name = ?1",
                params![name.as_str()],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use serde_json::json;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn create_test_record() -> CaseRecord {
        serde_json::from_value(json!({
            "Ptbs": "How to reduce noise",
            "Network": {"nodes": [{"id": "a pump", "color": "red"}], "edges": []}
        }))
        .unwrap()
    }

    #[test]
    fn test_save_and_load_case() {
        let store = create_test_store();
        let name = CaseName::from_string("case-1");
        store.save_case(&name, &create_test_record()).unwrap();

        let loaded = store.load_case(&name).unwrap().unwrap();
        assert_eq!(loaded, create_test_record());
        assert!(loaded.network().unwrap().unwrap().contains_node("a pump"));
    }

    #[test]
    fn test_save_replaces_record() {
        let store = create_test_store();
        let name = CaseName::from_string("case-1");
        store.save_case(&name, &create_test_record()).unwrap();
        store.save_case(&name, &CaseRecord::new()).unwrap();

        assert_eq!(store.load_case(&name).unwrap(), Some(CaseRecord::new()));
        assert_eq!(store.list_cases().unwrap().len(), 1);
    }

    #[test]
    fn test_list_cases_sorted() {
        let store = create_test_store();
        for name in ["beta", "alpha"] {
            store.save_case(&CaseName::from_string(name), &CaseRecord::new()).unwrap();
        }
        let names: Vec<String> = store.list_cases().unwrap().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_delete_case_cascades_image() {
        let store = create_test_store();
        let name = CaseName::from_string("case-1");
        store.save_case(&name, &CaseRecord::new()).unwrap();
        store.save_image(&name, &[7, 7]).unwrap();
        assert_eq!(store.load_image(&name).unwrap(), Some(vec![7, 7]));

        assert!(store.delete_case(&name).unwrap());
        assert!(!store.delete_case(&name).unwrap());
        assert_eq!(store.load_case(&name).unwrap(), None);
        assert_eq!(store.load_image(&name).unwrap(), None);
    }

    #[test]
    fn test_image_requires_case() {
        let store = create_test_store();
        let result = store.save_image(&CaseName::from_string("ghost"), &[1]);
        assert!(matches!(result, Err(StorageError::Database(_))));
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("claimgraph.db");
        let name = CaseName::from_string("persisted");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_case(&name, &create_test_record()).unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert!(reopened.load_case(&name).unwrap().is_some());
    }
}
