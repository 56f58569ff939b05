//! Error types for the question fetcher and the blob persister.

use thiserror::Error;

/// Errors returned while querying the question API.
#[derive(Debug, Error)]
pub enum QuestionError {
    /// The query failed local checks before any request was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// The request could not be sent or its body could not be read.
    #[error("question API request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("question API returned {status}: {message}")]
    Upstream {
        status: u16,
        error_id: Option<i64>,
        error_name: Option<String>,
        message: String,
    },
    /// The API answered with a body that is not a question page.
    #[error("failed to decode question API response: {0}")]
    Decode(String),
    /// An item carried a creation date outside the representable range.
    #[error("invalid creation timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Errors returned while persisting a blob.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No connection string was available at call time.
    #[error("storage connection string not set (env {0})")]
    MissingConnectionString(String),
    /// The connection string could not be parsed.
    #[error("invalid storage connection string: {0}")]
    InvalidConnectionString(String),
    /// The request failed without a service response.
    #[error("storage request failed: {0}")]
    Request(#[from] azure_core::Error),
    /// Container creation failed for a reason other than already existing.
    #[error("failed to create container {container} ({status}): {message}")]
    ContainerCreate {
        container: String,
        status: u16,
        message: String,
    },
    /// The blob upload was rejected.
    #[error("failed to upload blob {blob_name} ({status}): {message}")]
    Upload {
        blob_name: String,
        status: u16,
        message: String,
    },
}
