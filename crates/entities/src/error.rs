//! Validation errors raised at the data-entry boundary.

use chrono::NaiveTime;
use thiserror::Error;

/// A value that cannot be turned into a valid entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Event duration outside the allowed set.
    #[error("invalid event duration: {0} (expected one of 15, 30, 45, 60, 90, 120 minutes)")]
    InvalidDuration(i64),

    /// Event type outside the allowed set.
    #[error("invalid event type: {0:?} (expected in_person, phone or video)")]
    InvalidEventType(String),

    /// Preference type outside the allowed set.
    #[error("invalid preference type: {0:?} (expected low, medium or high)")]
    InvalidPreferenceType(String),

    /// Timeblock kind outside the allowed set.
    #[error("invalid timeblock kind: {0:?} (expected availability or event)")]
    InvalidTimeblockKind(String),

    /// A required text field is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A text field is longer than its column allows.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A timeblock whose end is not after its start.
    #[error("end time {end} must be after start time {start}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks that `value` is non-blank and at most `max` characters long.
pub(crate) fn check_text(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
