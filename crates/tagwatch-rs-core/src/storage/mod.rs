//! Blob persister and the storage seams it writes through.

mod azure;
mod connection_string;
mod persister;

pub use azure::{AzureBlobClient, AzureConnector};
pub use connection_string::{ConnectionStringSource, StorageAccount};
pub use persister::{BlobPersister, blob_name_at};

use crate::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a container creation attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    AlreadyExists,
}

#[async_trait]
/// Object storage operations used by the persister.
pub trait BlobStore: Send + Sync {
    /// Create `container`, reporting an existing one as `AlreadyExists`.
    async fn create_container(&self, container: &str) -> Result<ContainerStatus, StorageError>;

    /// Write `body` to `container/blob_name`, replacing any existing blob.
    async fn upload_blob(
        &self,
        container: &str,
        blob_name: &str,
        body: String,
    ) -> Result<(), StorageError>;
}

/// Resolves credentials and opens a `BlobStore`. Called once per save.
pub trait BlobStoreConnector: Send + Sync {
    fn connect(&self) -> Result<Arc<dyn BlobStore>, StorageError>;
}
