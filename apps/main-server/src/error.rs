//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entities::ValidationError;
use rpc_protocol::{ApiError, ErrorBody};
use schedule_store::ScheduleStoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before reaching the store.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] ScheduleStoreError),
}

impl ServerError {
    /// Returns the HTTP status and body for this error.
    pub fn to_api_error(&self) -> (StatusCode, ApiError) {
        match self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::invalid_request(msg.clone()))
            }
            ServerError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, ApiError::not_found(resource))
            }
            ServerError::Validation(e) => {
                (StatusCode::BAD_REQUEST, ApiError::validation_failed(e.to_string()))
            }
            ServerError::Store(e) => store_error_response(e),
        }
    }
}

fn store_error_response(err: &ScheduleStoreError) -> (StatusCode, ApiError) {
    match err {
        ScheduleStoreError::NotFound { entity_type, .. } => {
            (StatusCode::NOT_FOUND, ApiError::not_found(entity_type))
        }
        ScheduleStoreError::AlreadyExists { .. } | ScheduleStoreError::UniqueViolation { .. } => {
            (StatusCode::CONFLICT, ApiError::conflict(err.to_string()))
        }
        ScheduleStoreError::ForeignKeyViolation(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::reference_not_found(err.to_string()),
        ),
        ScheduleStoreError::Validation(e) => {
            (StatusCode::BAD_REQUEST, ApiError::validation_failed(e.to_string()))
        }
        ScheduleStoreError::CheckViolation(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::validation_failed(err.to_string()),
        ),
        ScheduleStoreError::CorruptRow { .. }
        | ScheduleStoreError::Migration(_)
        | ScheduleStoreError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::internal_error(err.to_string()),
        ),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_api_error();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(ErrorBody::from(error))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
