use crate::api::transport::Transport;
use crate::error::SyncError;
use serde_json::Value;
use std::sync::Arc;

use super::catalog::{ReferenceMetadata, META_FILE};

/// Static host serving the same documents as [`super::LocalStore`].
#[derive(Clone)]
pub struct RemoteSource {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl RemoteSource {
    pub fn new(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        RemoteSource {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    pub fn fetch_json(&self, name: &str) -> Result<Value, SyncError> {
        let response = self
            .transport
            .get(&self.url(name), &[])
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;

        if !response.is_success() {
            return Err(SyncError::Status {
                status: response.status,
                name: name.to_string(),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    pub fn fetch_metadata(&self) -> Result<ReferenceMetadata, SyncError> {
        let metadata: ReferenceMetadata = serde_json::from_value(self.fetch_json(META_FILE)?)?;
        if metadata.is_empty() {
            return Err(SyncError::Unreachable(format!(
                "{} returned empty metadata",
                self.url(META_FILE)
            )));
        }
        Ok(metadata)
    }
}
