//! RPC request types.
//!
//! Enumerated fields arrive as raw values (`event_duration` as an integer,
//! `event_type`, `preference_type` and `kind` as strings) so the server can
//! reject out-of-set values with a validation error instead of a parse
//! failure.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entities::NewEvent;
use serde::{Deserialize, Serialize};

// ============================================================================
// User Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: String,
}

// ============================================================================
// Contact Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddContactRequest {
    pub user_id: String,
    pub contact_user_id: String,
    /// Defaults to the time of the request.
    pub added_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetContactRequest {
    pub contact_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListContactsRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub include_removed: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveContactRequest {
    pub contact_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteContactRequest {
    pub contact_id: String,
}

// ============================================================================
// Event Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub event_title: String,
    pub event_duration: i64,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    pub invitee_id: String,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(request: CreateEventRequest) -> Self {
        NewEvent {
            event_title: request.event_title,
            event_duration: request.event_duration,
            event_type: request.event_type,
            description: request.description,
            invitee_id: request.invitee_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventRequest {
    pub event_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEventsRequest {
    pub event_type: Option<String>,
    pub invitee_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub event_id: String,
    pub event_title: Option<String>,
    pub event_duration: Option<i64>,
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub invitee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventRequest {
    pub event_id: String,
}

// ============================================================================
// Timeblock Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeblockRequest {
    /// `availability` or `event`.
    pub kind: String,
    pub user_id: String,
    pub event_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub preference_type: String,
    #[serde(default)]
    pub is_finalized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTimeblockRequest {
    pub kind: String,
    pub timeblock_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimeblocksRequest {
    pub kind: String,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_finalized: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTimeblockRequest {
    pub kind: String,
    pub timeblock_id: String,
    /// Links the block to this event.
    pub event_id: Option<String>,
    /// Clears the event link. Ignored when `event_id` is set.
    #[serde(default)]
    pub unlink_event: bool,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub preference_type: Option<String>,
    pub is_finalized: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTimeblockRequest {
    pub kind: String,
    pub timeblock_id: String,
}
