//! Contact entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timestamp;

/// A relationship between a user and another party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// The user on the other side of the relationship.
    pub contact_user_id: Uuid,
    /// When the contact was added.
    pub added_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub removed: bool,
}

impl Contact {
    /// Creates a new contact added now.
    pub fn new(user_id: Uuid, contact_user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            contact_user_id,
            added_at: timestamp::now(),
            removed: false,
        }
    }

    /// Sets the time the contact was added, at record precision.
    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = timestamp::truncate(added_at);
        self
    }

    /// Cuts `added_at` to record precision.
    pub fn at_record_precision(self) -> Self {
        let added_at = self.added_at;
        self.with_added_at(added_at)
    }

    /// Marks the contact as removed.
    pub fn remove(&mut self) {
        self.removed = true;
    }
}

/// One row of the administrative contact listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAdminRow {
    pub id: Uuid,
    /// Owner's username.
    pub user: String,
    pub added_at: DateTime<Utc>,
    pub removed: bool,
}

impl ContactAdminRow {
    /// Builds a row from a contact and its owner's username.
    pub fn new(contact: &Contact, username: impl Into<String>) -> Self {
        Self {
            id: contact.id,
            user: username.into(),
            added_at: contact.added_at,
            removed: contact.removed,
        }
    }
}
