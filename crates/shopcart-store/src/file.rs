//! # File Storage
//!
//! One JSON file per key inside a data directory.
//!
//! ```text
//! <data dir>/
//! ├── cart.store.json       ← set("cart", ...)
//! ├── cart.store.json.tmp   ← written first, then renamed over it
//! └── products.json         ← not ours; clear() leaves it alone
//! ```
//!
//! Only files named `<valid key>.store.json` belong to the store, so other
//! files sharing the directory survive `clear`.
//!
//! ## Platform-Specific Default Directory
//! - **macOS**: `~/Library/Application Support/com.shopcart.shopcart/`
//! - **Windows**: `%APPDATA%\shopcart\shopcart\data\`
//! - **Linux**: `~/.local/share/shopcart/`

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::storage::{validate_key, Storage};

const FILE_SUFFIX: &str = ".store.json";

/// Directory-backed storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        info!(?dir, "File storage opened");
        Ok(FileStorage { dir })
    }

    /// Opens the platform default data directory.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(Self::default_dir()?)
    }

    /// Returns the platform data directory for shopcart.
    pub fn default_dir() -> StoreResult<PathBuf> {
        ProjectDirs::from("com", "shopcart", "shopcart")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StoreError::NoDataDir)
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}{}", key, FILE_SUFFIX)))
    }

    fn is_store_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(FILE_SUFFIX))
            .is_some_and(|key| validate_key(key).is_ok())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{}{}.tmp", key, FILE_SUFFIX));

        fs::write(&tmp, value).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(?path, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn clear(&self) -> StoreResult<()> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(&self.dir, e))?.path();
            if path.is_file() && Self::is_store_file(&path) {
                fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
            }
        }
        debug!(dir = ?self.dir, "Storage cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path()).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path()).unwrap();

        store.set("cart", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));
        assert!(dir.path().join("cart.store.json").exists());
        assert!(!dir.path().join("cart.store.json.tmp").exists());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        FileStorage::open(dir.path()).unwrap().set("cart", "[]").unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path()).unwrap();

        store.set("cart", "[]").unwrap();
        store.set("other", "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
        fs::write(dir.path().join("products.json"), "[]").unwrap();

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get("other").unwrap(), None);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("products.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStorage::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }
}
