//! Schedule store error types.

use entities::ValidationError;
use thiserror::Error;

/// Errors that can occur during schedule store operations.
#[derive(Debug, Error)]
pub enum ScheduleStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Duplicate entity.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// A row with the same values already exists under a unique constraint.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    /// A column value outside its allowed set reached the database.
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// The record failed validation before being persisted.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A stored row could not be decoded.
    #[error("Corrupt row in {table}: {message}")]
    CorruptRow {
        table: &'static str,
        message: String,
    },

    /// Schema setup failed.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl ScheduleStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a unique constraint violation.
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    /// Creates a corrupt row error.
    pub fn corrupt_row(table: &'static str, message: impl ToString) -> Self {
        Self::CorruptRow {
            table,
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for ScheduleStoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::unique_violation(db_err.message());
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(db_err.message().to_string());
            }
            if db_err.is_check_violation() {
                return Self::CheckViolation(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

/// Result type for schedule store operations.
pub type StoreResult<T> = Result<T, ScheduleStoreError>;
