//! File-backed credential store (`session.json`).

use super::atomic_json::AtomicJsonFile;
use crate::paths::PortalPaths;
use portal_core::session::CredentialStore;
use portal_core::{PortalError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// Persists key/value entries in a single JSON object.
///
/// Entries are cached after the first read; every write goes through to
/// disk before returning.
pub struct FileCredentialStore {
    file: AtomicJsonFile<Entries>,
    cache: RwLock<Option<Entries>>,
}

impl FileCredentialStore {
    /// Store at the default location (`~/.config/edu-portal/session.json`).
    pub fn new() -> Result<Self> {
        let path = PortalPaths::default()
            .session_file()
            .map_err(|e| PortalError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            cache: RwLock::new(None),
        }
    }

    fn entries(&self) -> Result<Entries> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| PortalError::internal(format!("credential cache poisoned: {e}")))?;
            if let Some(entries) = cache.as_ref() {
                return Ok(entries.clone());
            }
        }

        let loaded = self.file.load()?.unwrap_or_default();
        self.store_cache(Some(loaded.clone()))?;
        Ok(loaded)
    }

    fn store_cache(&self, entries: Option<Entries>) -> Result<()> {
        let mut cache = self
            .cache
            .write()
            .map_err(|e| PortalError::internal(format!("credential cache poisoned: {e}")))?;
        *cache = entries;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.file.save(&entries)?;
        self.store_cache(Some(entries))?;
        debug!("Stored credential entry '{}' in {:?}", key, self.file.path());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        self.store_cache(Some(Entries::new()))?;
        debug!("Cleared credential store {:?}", self.file.path());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::session::{TOKEN_KEY, USER_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_entries_survive_a_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileCredentialStore::with_path(path.clone());
        store.set(TOKEN_KEY, "t1").unwrap();
        store.set(USER_KEY, r#"{"id":1,"name":"A","role":"teacher"}"#).unwrap();

        let reopened = FileCredentialStore::with_path(path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
        assert!(reopened.get(USER_KEY).unwrap().is_some());
    }

    #[test]
    fn test_clear_drops_both_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileCredentialStore::with_path(path.clone());
        store.set(TOKEN_KEY, "t1").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
        assert!(!path.exists());
    }
}
