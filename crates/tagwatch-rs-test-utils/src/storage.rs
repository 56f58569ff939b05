use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tagwatch_rs_core::{BlobStore, BlobStoreConnector, ContainerStatus, StorageError};

/// In-memory blob store that is also its own connector.
#[derive(Default)]
pub struct MemoryBlobStore {
    containers: Mutex<HashSet<String>>,
    blobs: Mutex<HashMap<(String, String), String>>,
    deny_container_create: bool,
    deny_upload: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store whose container creation is refused with a permission error.
    pub fn denying_container_create() -> Arc<Self> {
        Arc::new(Self {
            deny_container_create: true,
            ..Self::default()
        })
    }

    /// Store whose uploads are refused with a permission error.
    pub fn denying_upload() -> Arc<Self> {
        Arc::new(Self {
            deny_upload: true,
            ..Self::default()
        })
    }

    /// Connector that hands out this store on every call.
    pub fn connector(self: &Arc<Self>) -> Arc<MemoryConnector> {
        Arc::new(MemoryConnector(self.clone()))
    }

    pub fn blob(&self, container: &str, blob_name: &str) -> Option<String> {
        self.blobs
            .lock()
            .get(&(container.to_string(), blob_name.to_string()))
            .cloned()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn has_container(&self, container: &str) -> bool {
        self.containers.lock().contains(container)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn create_container(&self, container: &str) -> Result<ContainerStatus, StorageError> {
        if self.deny_container_create {
            return Err(StorageError::ContainerCreate {
                container: container.to_string(),
                status: 403,
                message: "AuthorizationPermissionMismatch".to_string(),
            });
        }
        if self.containers.lock().insert(container.to_string()) {
            Ok(ContainerStatus::Created)
        } else {
            Ok(ContainerStatus::AlreadyExists)
        }
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob_name: &str,
        body: String,
    ) -> Result<(), StorageError> {
        if self.deny_upload {
            return Err(StorageError::Upload {
                blob_name: blob_name.to_string(),
                status: 403,
                message: "AuthorizationPermissionMismatch".to_string(),
            });
        }
        self.blobs
            .lock()
            .insert((container.to_string(), blob_name.to_string()), body);
        Ok(())
    }
}

/// Connector handing out a shared `MemoryBlobStore`.
#[derive(Clone)]
pub struct MemoryConnector(pub Arc<MemoryBlobStore>);

impl BlobStoreConnector for MemoryConnector {
    fn connect(&self) -> Result<Arc<dyn BlobStore>, StorageError> {
        Ok(self.0.clone())
    }
}

/// Connector that behaves like an unset connection string variable.
#[derive(Debug, Default)]
pub struct MissingCredentials;

impl BlobStoreConnector for MissingCredentials {
    fn connect(&self) -> Result<Arc<dyn BlobStore>, StorageError> {
        Err(StorageError::MissingConnectionString(
            "STORAGE_ACCOUNT_CONNECTION_STRING".to_string(),
        ))
    }
}
