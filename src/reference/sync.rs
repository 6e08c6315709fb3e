//! Keeps the local reference store in step with the remote one and rebuilds
//! the in-memory catalog from disk.
//!
//! Staleness is decided on the whole metadata document: if the local
//! `version` differs from the remote one, every content file is downloaded
//! again. `meta.json` is written last, so an interrupted sync leaves the old
//! version marker in place and the next sync retries the download.

use crate::api::transport::Transport;
use crate::config::Config;
use crate::error::SyncError;
use serde::de::DeserializeOwned;
use std::path::{Component, Path};
use std::sync::Arc;

use super::catalog::{
    ReferenceCatalog, ReferenceMetadata, ReferenceTable, SharedCatalog, ABILITIES_FILE,
    HEROES_FILE, ITEMS_FILE, META_FILE,
};
use super::remote::RemoteSource;
use super::store::LocalStore;

/// Result of a sync attempt. Only `Current` and `Updated` carry the remote
/// metadata; the degraded variants report why enrichment may be stale.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Local copy already matched the remote version.
    Current { metadata: ReferenceMetadata },
    /// Content files were downloaded and the local store rewritten.
    Updated {
        metadata: ReferenceMetadata,
        downloaded: Vec<String>,
    },
    /// Remote metadata could not be fetched; tables were loaded from disk
    /// when a local copy exists, otherwise left as they were.
    Offline {
        local: ReferenceMetadata,
        reason: SyncError,
    },
    /// Disk or download failure; in-memory tables were left untouched.
    Failed { reason: SyncError },
}

impl SyncOutcome {
    /// Remote metadata after a successful sync, an empty record otherwise.
    pub fn metadata(&self) -> ReferenceMetadata {
        match self {
            SyncOutcome::Current { metadata } | SyncOutcome::Updated { metadata, .. } => {
                metadata.clone()
            }
            SyncOutcome::Offline { .. } | SyncOutcome::Failed { .. } => {
                ReferenceMetadata::default()
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SyncOutcome::Offline { .. } | SyncOutcome::Failed { .. })
    }

    pub fn downloaded(&self) -> &[String] {
        match self {
            SyncOutcome::Updated { downloaded, .. } => downloaded,
            _ => &[],
        }
    }
}

pub struct Synchronizer {
    store: LocalStore,
    remote: RemoteSource,
    catalog: SharedCatalog,
}

impl Synchronizer {
    pub fn new(store: LocalStore, remote: RemoteSource, catalog: SharedCatalog) -> Self {
        Synchronizer {
            store,
            remote,
            catalog,
        }
    }

    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::new(
            LocalStore::new(&config.data_dir),
            RemoteSource::new(transport, &config.reference_url),
            SharedCatalog::default(),
        )
    }

    pub fn catalog(&self) -> SharedCatalog {
        self.catalog.clone()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn sync(&self, purge: bool) -> SyncOutcome {
        match self.try_sync(purge) {
            Ok(outcome) => outcome,
            Err(reason) => {
                tracing::warn!("Reference sync failed: {}", reason);
                SyncOutcome::Failed { reason }
            }
        }
    }

    /// Rebuild the catalog from the local store without touching the network.
    pub fn load_local(&self) -> Result<(), SyncError> {
        let catalog = self.read_catalog()?;
        tracing::debug!(
            "Loaded reference tables: {} heroes, {} items, {} abilities",
            catalog.heroes.len(),
            catalog.items.len(),
            catalog.abilities.len()
        );
        self.catalog.replace(catalog);
        Ok(())
    }

    fn try_sync(&self, purge: bool) -> Result<SyncOutcome, SyncError> {
        if purge {
            tracing::info!("Purging local reference data at {}", self.store.dir().display());
            self.store.purge()?;
        }

        let local = self.store.read_metadata();

        let remote = match self.remote.fetch_metadata() {
            Ok(metadata) => metadata,
            Err(reason) => {
                if local.is_empty() && !self.has_local_tables() {
                    tracing::warn!("Reference source unavailable and no local copy: {}", reason);
                } else {
                    tracing::warn!("Reference source unavailable, using local copy: {}", reason);
                    self.load_local()?;
                }
                return Ok(SyncOutcome::Offline { local, reason });
            }
        };

        if local.is_current_with(&remote) {
            tracing::info!("Reference data is up to date (version {:?})", remote.version);
            self.load_local()?;
            return Ok(SyncOutcome::Current { metadata: remote });
        }

        tracing::info!(
            "Reference data outdated (local {:?}, remote {:?}), downloading {} files",
            local.version,
            remote.version,
            remote.content_files.len()
        );

        for name in &remote.content_files {
            check_content_file(name)?;
        }

        let mut downloaded = Vec::with_capacity(remote.content_files.len());
        for name in &remote.content_files {
            let content = self.remote.fetch_json(name)?;
            self.store.write_json(name, &content)?;
            tracing::debug!("Downloaded {}", name);
            downloaded.push(name.clone());
        }
        self.store.write_metadata(&remote)?;

        self.load_local()?;
        Ok(SyncOutcome::Updated {
            metadata: remote,
            downloaded,
        })
    }

    fn has_local_tables(&self) -> bool {
        [HEROES_FILE, ITEMS_FILE, ABILITIES_FILE]
            .iter()
            .any(|name| self.store.path(name).exists())
    }

    fn read_catalog(&self) -> Result<ReferenceCatalog, SyncError> {
        Ok(ReferenceCatalog {
            heroes: self.read_table(HEROES_FILE)?,
            items: self.read_table(ITEMS_FILE)?,
            abilities: self.read_table(ABILITIES_FILE)?,
        })
    }

    fn read_table<R: DeserializeOwned>(&self, name: &str) -> Result<ReferenceTable<R>, SyncError> {
        match self.store.read_json(name)? {
            Some(value) => Ok(ReferenceTable::from_json(value)?),
            None => Ok(ReferenceTable::default()),
        }
    }
}

/// Content files must be bare names inside the data directory.
fn check_content_file(name: &str) -> Result<(), SyncError> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if single && !name.contains(['/', '\\']) && name != META_FILE {
        Ok(())
    } else {
        Err(SyncError::InvalidFileName(name.to_string()))
    }
}
