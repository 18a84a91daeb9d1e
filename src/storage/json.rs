//! Directory-per-case JSON storage

use super::traits::{image_file_name, CaseStore, StorageResult};
use crate::case::{CaseName, CaseRecord};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each case as `<root>/<case>/Summary_<case>.json` with its image
/// next to it as `appl_image_<case>.png`.
///
/// Records are written with four-space indentation and non-ASCII text
/// kept as is, so the files stay readable and hand-editable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Use `root` as the data directory, creating it if needed
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn case_dir(&self, name: &CaseName) -> PathBuf {
        self.root.join(name.as_str())
    }

    pub fn record_path(&self, name: &CaseName) -> PathBuf {
        self.case_dir(name).join(format!("Summary_{name}.json"))
    }

    pub fn image_path(&self, name: &CaseName) -> PathBuf {
        self.case_dir(name).join(image_file_name(name))
    }
}

fn to_pretty_json(record: &CaseRecord) -> StorageResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    record.serialize(&mut serializer)?;
    Ok(out)
}

/// `Ok(None)` for a missing file
fn read_optional(path: &Path) -> StorageResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl CaseStore for JsonFileStore {
    fn save_case(&self, name: &CaseName, record: &CaseRecord) -> StorageResult<()> {
        fs::create_dir_all(self.case_dir(name))?;
        fs::write(self.record_path(name), to_pretty_json(record)?)?;
        Ok(())
    }

    fn load_case(&self, name: &CaseName) -> StorageResult<Option<CaseRecord>> {
        match read_optional(&self.record_path(name))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn delete_case(&self, name: &CaseName) -> StorageResult<bool> {
        match fs::remove_dir_all(self.case_dir(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_cases(&self) -> StorageResult<Vec<CaseName>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(dir_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let name = CaseName::from_string(dir_name);
            if self.record_path(&name).is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn save_image(&self, name: &CaseName, bytes: &[u8]) -> StorageResult<String> {
        fs::create_dir_all(self.case_dir(name))?;
        let path = self.image_path(name);
        fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }

    fn load_image(&self, name: &CaseName) -> StorageResult<Option<Vec<u8>>> {
        read_optional(&self.image_path(name))
    }
}
