//! API error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes carried in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The JSON sent is not a valid request object
    InvalidRequest = -32600,
    /// Internal error
    InternalError = -32603,

    // Server-defined errors (-32000 to -32099)
    /// The requested resource was not found
    NotFound = -32003,
    /// The request conflicts with an existing record
    Conflict = -32004,
    /// A field value is outside its allowed set or bounds
    ValidationFailed = -32010,
    /// A referenced user or event does not exist
    ReferenceNotFound = -32011,
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            -32600 => ErrorCode::InvalidRequest,
            -32603 => ErrorCode::InternalError,
            -32003 => ErrorCode::NotFound,
            -32004 => ErrorCode::Conflict,
            -32010 => ErrorCode::ValidationFailed,
            -32011 => ErrorCode::ReferenceNotFound,
            _ => ErrorCode::InternalError,
        }
    }
}

/// Error object returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct ApiError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Creates a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
        }
    }

    /// Creates an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Creates an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Creates a not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Creates a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Creates a validation error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Creates a missing reference error
    pub fn reference_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ReferenceNotFound, message)
    }

    /// Returns the typed error code
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

/// Wire envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ApiError,
}

impl From<ApiError> for ErrorBody {
    fn from(error: ApiError) -> Self {
        Self { error }
    }
}
