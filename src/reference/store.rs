use crate::error::SyncError;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::catalog::{ReferenceMetadata, META_FILE};

/// Directory of plain JSON documents: `meta.json` plus one file per
/// content table.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// `Ok(None)` when the document does not exist.
    pub fn read_json(&self, name: &str) -> Result<Option<Value>, SyncError> {
        match fs::read_to_string(self.path(name)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_json<T: Serialize>(&self, name: &str, data: &T) -> Result<(), SyncError> {
        fs::create_dir_all(&self.dir)?;
        let json = if name == META_FILE {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        fs::write(self.path(name), json)?;
        Ok(())
    }

    /// Local metadata, or an empty record when it is missing or unreadable.
    pub fn read_metadata(&self) -> ReferenceMetadata {
        let value = match self.read_json(META_FILE) {
            Ok(Some(value)) => value,
            Ok(None) => return ReferenceMetadata::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable local metadata: {}", e);
                return ReferenceMetadata::default();
            }
        };

        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed local metadata: {}", e);
            ReferenceMetadata::default()
        })
    }

    pub fn write_metadata(&self, metadata: &ReferenceMetadata) -> Result<(), SyncError> {
        self.write_json(META_FILE, metadata)
    }

    pub fn purge(&self) -> Result<(), SyncError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_document_is_none() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path().join("data"));

        assert!(store.read_json("heroes.json").unwrap().is_none());
        assert!(store.read_metadata().is_empty());
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path().join("nested").join("data"));

        store.write_json("heroes.json", &json!({"1": {"hero_name": "antimage"}})).unwrap();

        assert_eq!(
            store.read_json("heroes.json").unwrap(),
            Some(json!({"1": {"hero_name": "antimage"}}))
        );
    }

    #[test]
    fn test_corrupt_metadata_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path());
        fs::write(store.path(META_FILE), "{ not json").unwrap();

        assert!(store.read_json(META_FILE).is_err());
        assert!(store.read_metadata().is_empty());
    }

    #[test]
    fn test_purge() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path().join("data"));
        store.write_json("items.json", &json!({})).unwrap();

        store.purge().unwrap();
        assert!(!store.dir().exists());

        // purging an absent store is fine
        store.purge().unwrap();
    }
}
