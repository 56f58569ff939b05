//! Blob persister: one timestamped, overwriting upload per save.

use super::{BlobStoreConnector, ContainerStatus};
use crate::StorageError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

/// Blob name for a save made at `now`, at second granularity.
///
/// Saves within the same second share a name; the later upload wins.
pub fn blob_name_at(now: DateTime<Utc>) -> String {
    format!("response-{}.json", now.format("%Y%m%d-%H%M%S"))
}

/// Writes agent responses into a single container.
#[derive(Clone)]
pub struct BlobPersister {
    connector: Arc<dyn BlobStoreConnector>,
    container: String,
    strict_container_create: bool,
}

impl BlobPersister {
    pub fn new(connector: Arc<dyn BlobStoreConnector>, container: impl Into<String>) -> Self {
        Self {
            connector,
            container: container.into(),
            strict_container_create: false,
        }
    }

    /// Surface container creation failures other than "already exists".
    pub fn with_strict_container_create(mut self, strict: bool) -> Self {
        self.strict_container_create = strict;
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Save `payload` under a name derived from the current time.
    pub async fn save(&self, payload: &str) -> Result<String, StorageError> {
        self.save_at(payload, Utc::now()).await
    }

    /// Save `payload` under the name for `now`, returning that name.
    pub async fn save_at(&self, payload: &str, now: DateTime<Utc>) -> Result<String, StorageError> {
        let store = self.connector.connect()?;
        let blob_name = blob_name_at(now);

        match store.create_container(&self.container).await {
            Ok(ContainerStatus::Created) => {
                info!("created container (container={})", self.container)
            }
            Ok(ContainerStatus::AlreadyExists) => {
                debug!("container already exists (container={})", self.container)
            }
            Err(err) if self.strict_container_create => return Err(err),
            Err(err) => warn!(
                "ignoring container create failure (container={}): {}",
                self.container, err
            ),
        }

        store
            .upload_blob(&self.container, &blob_name, payload.to_string())
            .await?;
        info!(
            "agent response saved to blob (container={}, blob_name={})",
            self.container, blob_name
        );
        Ok(blob_name)
    }
}
