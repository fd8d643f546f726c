//! RPC response types.

use entities::ContactAdminRow;
use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// User Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {}

// ============================================================================
// Contact Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddContactResponse {
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetContactResponse {
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContactsResponse {
    pub contacts: Vec<Contact>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveContactResponse {
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteContactResponse {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminContactsResponse {
    pub contacts: Vec<ContactAdminRow>,
}

// ============================================================================
// Event Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventResponse {
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventResponse {
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventResponse {}

// ============================================================================
// Timeblock Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeblockResponse {
    pub timeblock: Timeblock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTimeblockResponse {
    pub timeblock: Timeblock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimeblocksResponse {
    pub timeblocks: Vec<Timeblock>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTimeblockResponse {
    pub timeblock: Timeblock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTimeblockResponse {}
