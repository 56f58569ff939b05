//! Mapping of core errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use tagwatch_rs_core::{QuestionError, StorageError};
use tagwatch_rs_protocol::ErrorBody;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Questions(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Questions(QuestionError::InvalidQuery(_)) => StatusCode::BAD_REQUEST,
            Self::Questions(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed ({}): {}", status.as_u16(), self);
        } else {
            warn!("request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invalid_queries_are_client_errors() {
        let err = ApiError::from(QuestionError::InvalidQuery("pagesize".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_and_storage_failures_are_server_errors() {
        let upstream = ApiError::from(QuestionError::Decode("eof".to_string()));
        let storage = ApiError::from(StorageError::MissingConnectionString("X".to_string()));
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
