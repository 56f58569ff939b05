//! Request handling core for Tagwatch.
//!
//! Two independent operations live here: the question fetcher, which queries
//! a Stack Exchange site and normalizes the results, and the blob persister,
//! which writes agent responses to Azure Blob Storage. Both reach their
//! upstream through a trait so the server and tests can swap implementations.

mod error;
mod http;
pub mod questions;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use error::{QuestionError, StorageError};
pub use http::build_http_client;
pub use questions::{QuestionFetcher, QuestionSource, StackExchangeClient};
pub use storage::{
    AzureBlobClient, AzureConnector, BlobPersister, BlobStore, BlobStoreConnector,
    ConnectionStringSource, ContainerStatus, StorageAccount, blob_name_at,
};
