//! Azure Blob Storage through the storage SDK.

use super::connection_string::{ConnectionStringSource, StorageAccount};
use super::{BlobStore, BlobStoreConnector, ContainerStatus};
use crate::StorageError;
use async_trait::async_trait;
use azure_core::{RetryOptions, TransportOptions};
use azure_storage_blobs::prelude::{BlobServiceClient, ClientBuilder};
use log::debug;
use std::sync::Arc;

/// Content type stored with uploaded blobs; payloads are not inspected.
const BLOB_CONTENT_TYPE: &str = "application/octet-stream";
/// Error code returned when creating a container that exists.
const CONTAINER_ALREADY_EXISTS: &str = "ContainerAlreadyExists";
const CONFLICT: u16 = 409;

/// Blob service client for one storage account.
#[derive(Clone)]
pub struct AzureBlobClient {
    service: BlobServiceClient,
}

impl AzureBlobClient {
    /// Build a client sending through `http`. The SDK retry policy is
    /// disabled so each operation is a single round trip.
    pub fn new(http: reqwest::Client, account: &StorageAccount) -> Self {
        let service = ClientBuilder::with_location(account.location(), account.credentials())
            .retry(RetryOptions::none())
            .transport(TransportOptions::new(Arc::new(http)))
            .blob_service_client();
        Self { service }
    }
}

/// Status and service error code of a failed operation, or the error itself
/// when no response was received.
fn service_failure(err: azure_core::Error) -> Result<(u16, Option<String>), StorageError> {
    if let Some(http) = err.as_http_error() {
        return Ok((
            u16::from(http.status()),
            http.error_code().map(str::to_string),
        ));
    }
    Err(StorageError::Request(err))
}

fn failure_message(status: u16, code: Option<String>) -> String {
    code.unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl BlobStore for AzureBlobClient {
    async fn create_container(&self, container: &str) -> Result<ContainerStatus, StorageError> {
        debug!("creating container (container={})", container);
        let err = match self.service.container_client(container).create().await {
            Ok(_) => return Ok(ContainerStatus::Created),
            Err(err) => err,
        };

        let (status, code) = service_failure(err)?;
        // A conflict without an error code is still treated as existing.
        let exists = code
            .as_deref()
            .is_none_or(|code| code == CONTAINER_ALREADY_EXISTS);
        if status == CONFLICT && exists {
            return Ok(ContainerStatus::AlreadyExists);
        }
        Err(StorageError::ContainerCreate {
            container: container.to_string(),
            status,
            message: failure_message(status, code),
        })
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob_name: &str,
        body: String,
    ) -> Result<(), StorageError> {
        debug!(
            "uploading blob (container={}, blob_name={}, len={})",
            container,
            blob_name,
            body.len()
        );
        let result = self
            .service
            .container_client(container)
            .blob_client(blob_name)
            .put_block_blob(body)
            .content_type(BLOB_CONTENT_TYPE)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let (status, code) = service_failure(err)?;
                Err(StorageError::Upload {
                    blob_name: blob_name.to_string(),
                    status,
                    message: failure_message(status, code),
                })
            }
        }
    }
}

/// Opens an `AzureBlobClient` from a connection string resolved per call.
#[derive(Debug, Clone)]
pub struct AzureConnector {
    http: reqwest::Client,
    source: ConnectionStringSource,
}

impl AzureConnector {
    pub fn new(http: reqwest::Client, source: ConnectionStringSource) -> Self {
        Self { http, source }
    }
}

impl BlobStoreConnector for AzureConnector {
    fn connect(&self) -> Result<Arc<dyn BlobStore>, StorageError> {
        let account = StorageAccount::parse(&self.source.resolve()?)?;
        debug!(
            "connected to blob endpoint (account={}, endpoint={})",
            account.account, account.blob_endpoint
        );
        Ok(Arc::new(AzureBlobClient::new(self.http.clone(), &account)))
    }
}
