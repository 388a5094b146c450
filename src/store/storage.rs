//! Key-value persistence backends
//!
//! The kiosk persists each top-level collection as one JSON snapshot under a
//! well-known key, overwritten whole on every save.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::AppResult;

/// Storage key for the employee map
pub const EMPLOYEES_KEY: &str = "employees";
/// Storage key for the equipment map
pub const EQUIPMENT_KEY: &str = "equipmentItems";
/// Storage key for the append-only record log
pub const RECORDS_KEY: &str = "records";

/// Pluggable local key-value storage
pub trait Storage {
    /// Read the raw value for a key; `None` when the key has never been written
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the value for a key
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// File-backed storage: one `<key>.json` file per key under a data directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral kiosk sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before the store loads, for tests
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_reports_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path()).unwrap();

        assert_eq!(storage.read(EMPLOYEES_KEY).unwrap(), None);
        storage.write(EMPLOYEES_KEY, r#"{"B1":{"name":"Ada"}}"#).unwrap();
        assert_eq!(
            storage.read(EMPLOYEES_KEY).unwrap().as_deref(),
            Some(r#"{"B1":{"name":"Ada"}}"#)
        );
    }

    #[test]
    fn file_storage_creates_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kiosk").join("data");
        let mut storage = FileStorage::new(&nested).unwrap();
        storage.write(RECORDS_KEY, "[]").unwrap();
        assert!(nested.join("records.json").is_file());
    }
}
