//! RPC type definitions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entities::{EventDuration, EventType, PreferenceType, TimeblockKind};
use serde::{Deserialize, Serialize};

/// User.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&entities::User> for User {
    fn from(user: &entities::User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub contact_user_id: String,
    pub added_at: DateTime<Utc>,
    pub removed: bool,
}

impl From<&entities::Contact> for Contact {
    fn from(contact: &entities::Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            user_id: contact.user_id.to_string(),
            contact_user_id: contact.contact_user_id.to_string(),
            added_at: contact.added_at,
            removed: contact.removed,
        }
    }
}

/// Event. `event_duration` is serialized as whole minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub event_title: String,
    pub event_duration: EventDuration,
    pub event_type: EventType,
    pub description: String,
    pub invitee_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&entities::Event> for Event {
    fn from(event: &entities::Event) -> Self {
        Self {
            id: event.id.to_string(),
            event_title: event.title.clone(),
            event_duration: event.duration,
            event_type: event.event_type,
            description: event.description.clone(),
            invitee_id: event.invitee_id.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Availability or event timeblock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeblock {
    pub id: String,
    pub kind: TimeblockKind,
    pub event_id: Option<String>,
    pub user_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub preference_type: PreferenceType,
    pub is_finalized: bool,
}

impl From<&entities::Timeblock> for Timeblock {
    fn from(block: &entities::Timeblock) -> Self {
        Self {
            id: block.id.to_string(),
            kind: block.kind,
            event_id: block.event_id.map(|id| id.to_string()),
            user_id: block.user_id.to_string(),
            date: block.date,
            start_time: block.start_time,
            end_time: block.end_time,
            preference_type: block.preference_type,
            is_finalized: block.is_finalized,
        }
    }
}
