//! Workbench: the set of open cases, optionally backed by a store

use super::name::CaseName;
use super::record::CaseRecord;
use super::session::CaseSession;
use crate::error::ClaimGraphResult;
use crate::storage::{image_file_name, CaseStore, StorageError};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Case cache with write-through persistence.
///
/// Without a store everything lives in memory. With one, every commit is
/// written to the store immediately and cases missing from the cache are
/// read from it on first access.
pub struct Workbench {
    cases: DashMap<CaseName, CaseRecord>,
    images: DashMap<CaseName, Vec<u8>>,
    store: Option<Arc<dyn CaseStore>>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("cases", &self.cases.len())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Workbench {
    /// An in-memory workbench
    pub fn new() -> Self {
        Self {
            cases: DashMap::new(),
            images: DashMap::new(),
            store: None,
        }
    }

    pub fn with_store(store: Arc<dyn CaseStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Load every stored case into the cache. Returns the number loaded.
    pub fn load_all(&self) -> ClaimGraphResult<usize> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let mut loaded = 0;
        for name in store.list_cases()? {
            if let Some(record) = store.load_case(&name)? {
                self.cases.insert(name, record);
                loaded += 1;
            }
        }
        debug!(cases = loaded, "loaded cases from store");
        Ok(loaded)
    }

    /// Create a case from a user supplied name. An existing case of the
    /// same sanitized name is kept as it is.
    pub fn create_case(&self, raw_name: &str, uuid_suffix: bool) -> ClaimGraphResult<CaseName> {
        let name = CaseName::sanitize(raw_name, uuid_suffix);
        if self.find(&name)?.is_none() {
            self.put(&name, CaseRecord::new())?;
            info!(case = %name, "created case");
        }
        Ok(name)
    }

    /// The record of a case, from the cache or the store
    pub fn get_case(&self, name: &CaseName) -> ClaimGraphResult<CaseRecord> {
        self.find(name)?
            .ok_or_else(|| StorageError::CaseNotFound(name.to_string()).into())
    }

    pub fn has_case(&self, name: &CaseName) -> ClaimGraphResult<bool> {
        Ok(self.find(name)?.is_some())
    }

    /// Open a case for editing
    pub fn open(&self, name: &CaseName) -> ClaimGraphResult<CaseSession> {
        Ok(CaseSession::new(name.clone(), self.get_case(name)?))
    }

    /// Write a session's record back to the cache and the store
    pub fn commit(&self, session: &CaseSession) -> ClaimGraphResult<()> {
        self.put(session.name(), session.record().clone())
    }

    /// Replace a case's record
    pub fn put(&self, name: &CaseName, record: CaseRecord) -> ClaimGraphResult<()> {
        if let Some(store) = &self.store {
            store.save_case(name, &record)?;
        }
        self.cases.insert(name.clone(), record);
        Ok(())
    }

    /// Remove a case and its image. Returns whether anything existed.
    pub fn remove_case(&self, name: &CaseName) -> ClaimGraphResult<bool> {
        let cached = self.cases.remove(name).is_some();
        self.images.remove(name);
        let stored = match &self.store {
            Some(store) => store.delete_case(name)?,
            None => false,
        };
        Ok(cached || stored)
    }

    /// All case names, sorted
    pub fn list_cases(&self) -> ClaimGraphResult<Vec<CaseName>> {
        let mut names: Vec<CaseName> = self.cases.iter().map(|r| r.key().clone()).collect();
        if let Some(store) = &self.store {
            for name in store.list_cases()? {
                if !self.cases.contains_key(&name) {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn case_count(&self) -> ClaimGraphResult<usize> {
        Ok(self.list_cases()?.len())
    }

    /// Store the application image of a case and record its reference
    /// under `"Appl. Image"`.
    pub fn save_image(&self, name: &CaseName, bytes: &[u8]) -> ClaimGraphResult<String> {
        let mut record = self.get_case(name)?;
        let reference = match &self.store {
            Some(store) => store.save_image(name, bytes)?,
            None => image_file_name(name),
        };
        self.images.insert(name.clone(), bytes.to_vec());
        record.set_appl_image(reference.as_str());
        self.put(name, record)?;
        Ok(reference)
    }

    pub fn load_image(&self, name: &CaseName) -> ClaimGraphResult<Option<Vec<u8>>> {
        if let Some(bytes) = self.images.get(name) {
            return Ok(Some(bytes.clone()));
        }
        match &self.store {
            Some(store) => Ok(store.load_image(name)?),
            None => Ok(None),
        }
    }

    fn find(&self, name: &CaseName) -> ClaimGraphResult<Option<CaseRecord>> {
        if let Some(record) = self.cases.get(name) {
            return Ok(Some(record.clone()));
        }
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let loaded = store.load_case(name)?;
        if let Some(record) = &loaded {
            self.cases.insert(name.clone(), record.clone());
        }
        Ok(loaded)
    }
}
