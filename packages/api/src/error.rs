// ABOUTME: API error type and its HTTP mapping
// ABOUTME: Validation failures become plain-text 400s, storage faults are logged

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, info};

use todoapp_core::ValidationError;
use todoapp_storage::StorageError;

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    MalformedQuery(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) | ApiError::MalformedQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Storage(StorageError::Duplicate(_)) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text sent to the client; storage internals are never exposed
    fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::MalformedBody(msg) | ApiError::MalformedQuery(msg) => msg.clone(),
            ApiError::Storage(StorageError::NotFound) => "Todo Not Found".to_string(),
            ApiError::Storage(StorageError::Duplicate(_)) => "Todo Already Exists".to_string(),
            ApiError::Storage(_) => "Internal Server Error".to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Storage error while handling request");
        } else {
            info!(status = %status.as_u16(), error = %self, "API error response");
        }

        (status, self.user_message()).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedQuery(rejection.body_text())
    }
}

/// Raw query pairs; repeated keys are kept so validation sees them
pub type QueryPairs = Vec<(String, String)>;

pub type ApiResult<T> = Result<T, ApiError>;
