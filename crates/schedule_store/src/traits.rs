//! Schedule store trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use entities::{
    Contact, Event, EventPatch, EventType, Timeblock, TimeblockKind, TimeblockPatch, User, UserPatch,
};
use uuid::Uuid;

use crate::StoreResult;

/// Filter options for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Filter options for listing contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Filter by owning user ID.
    pub user_id: Option<Uuid>,
    /// Whether soft-removed contacts are included.
    pub include_removed: bool,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl ContactFilter {
    /// Every contact, removed ones included. Used by the admin listing.
    pub fn all() -> Self {
        Self {
            include_removed: true,
            ..Self::default()
        }
    }

    /// Filters by owner.
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}

/// Filter options for listing events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Filter by event type.
    pub event_type: Option<EventType>,
    /// Filter by invitee identifier.
    pub invitee_id: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Filter options for listing timeblocks.
#[derive(Debug, Clone, Default)]
pub struct TimeblockFilter {
    /// Filter by owning user ID.
    pub user_id: Option<Uuid>,
    /// Filter by event ID.
    pub event_id: Option<Uuid>,
    /// Filter by date.
    pub date: Option<NaiveDate>,
    /// Filter by finalization flag.
    pub is_finalized: Option<bool>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl TimeblockFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by user.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filters by event.
    pub fn with_event(mut self, event_id: Uuid) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Filters by date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filters by finalization flag.
    pub fn with_finalized(mut self, is_finalized: bool) -> Self {
        self.is_finalized = Some(is_finalized);
        self
    }

    /// Returns true if `block` passes every set criterion.
    pub fn matches(&self, block: &Timeblock) -> bool {
        self.user_id.is_none_or(|id| block.user_id == id)
            && self.event_id.is_none_or(|id| block.event_id == Some(id))
            && self.date.is_none_or(|d| block.date == d)
            && self.is_finalized.is_none_or(|f| block.is_finalized == f)
    }
}

/// Trait for schedule storage operations.
///
/// Every mutating call is atomic. Updates merge a patch into the stored
/// record under the same lock or transaction as the write. Deleting a user removes the user's contacts
/// and timeblocks; deleting an event clears `event_id` on the timeblocks that
/// referenced it.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails if the username is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Lists users ordered by username, with the total count.
    async fn list_users(&self, filter: UserFilter) -> StoreResult<(Vec<User>, u32)>;

    /// Applies `patch` to a user and returns the result.
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User>;

    /// Deletes a user and everything the user owns.
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Contact operations
    // =========================================================================

    /// Creates a new contact. Both users must exist.
    async fn create_contact(&self, contact: Contact) -> StoreResult<Contact>;

    /// Gets a contact by ID.
    async fn get_contact(&self, id: Uuid) -> StoreResult<Option<Contact>>;

    /// Lists contacts ordered by `added_at` ascending, with the total count.
    async fn list_contacts(&self, filter: ContactFilter) -> StoreResult<(Vec<Contact>, u32)>;

    /// Marks a contact as removed and returns it.
    async fn remove_contact(&self, id: Uuid) -> StoreResult<Contact>;

    /// Permanently deletes a contact.
    async fn delete_contact(&self, id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Event operations
    // =========================================================================

    /// Creates a new event.
    async fn create_event(&self, event: Event) -> StoreResult<Event>;

    /// Gets an event by ID.
    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>>;

    /// Lists events ordered by creation time, with the total count.
    async fn list_events(&self, filter: EventFilter) -> StoreResult<(Vec<Event>, u32)>;

    /// Applies `patch` to an event and returns the result.
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event>;

    /// Deletes an event, unlinking its timeblocks.
    async fn delete_event(&self, id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Timeblock operations
    // =========================================================================

    /// Creates a timeblock in the table selected by `block.kind`.
    async fn create_timeblock(&self, block: Timeblock) -> StoreResult<Timeblock>;

    /// Gets a timeblock by ID.
    async fn get_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<Option<Timeblock>>;

    /// Lists timeblocks ordered by date and time, with the total count.
    async fn list_timeblocks(
        &self,
        kind: TimeblockKind,
        filter: TimeblockFilter,
    ) -> StoreResult<(Vec<Timeblock>, u32)>;

    /// Applies `patch` to a timeblock and returns the result.
    async fn update_timeblock(
        &self,
        kind: TimeblockKind,
        id: Uuid,
        patch: TimeblockPatch,
    ) -> StoreResult<Timeblock>;

    /// Deletes a timeblock.
    async fn delete_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<()>;
}
