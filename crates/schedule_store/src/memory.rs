//! In-memory schedule store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use entities::{
    Contact, Event, EventPatch, Timeblock, TimeblockKind, TimeblockPatch, User, UserPatch,
    timestamp,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    ContactFilter, EventFilter, ScheduleStore, ScheduleStoreError, StoreResult, TimeblockFilter,
    UserFilter,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    contacts: HashMap<Uuid, Contact>,
    events: HashMap<Uuid, Event>,
    availability_timeblocks: HashMap<Uuid, Timeblock>,
    event_timeblocks: HashMap<Uuid, Timeblock>,
}

impl Tables {
    fn timeblocks(&self, kind: TimeblockKind) -> &HashMap<Uuid, Timeblock> {
        match kind {
            TimeblockKind::Availability => &self.availability_timeblocks,
            TimeblockKind::Event => &self.event_timeblocks,
        }
    }

    fn timeblocks_mut(&mut self, kind: TimeblockKind) -> &mut HashMap<Uuid, Timeblock> {
        match kind {
            TimeblockKind::Availability => &mut self.availability_timeblocks,
            TimeblockKind::Event => &mut self.event_timeblocks,
        }
    }

    fn check_user_exists(&self, user_id: Uuid) -> StoreResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(ScheduleStoreError::ForeignKeyViolation(format!(
                "user {user_id} does not exist"
            )))
        }
    }

    /// Checks the references and the unique constraint of a timeblock about
    /// to be written.
    fn check_timeblock(&self, block: &Timeblock) -> StoreResult<()> {
        self.check_user_exists(block.user_id)?;
        if let Some(event_id) = block.event_id {
            if !self.events.contains_key(&event_id) {
                return Err(ScheduleStoreError::ForeignKeyViolation(format!(
                    "event {event_id} does not exist"
                )));
            }
        }

        if let Some(key) = block.unique_key() {
            let conflict = self
                .timeblocks(block.kind)
                .values()
                .any(|other| other.id != block.id && other.unique_key() == Some(key));
            if conflict {
                return Err(ScheduleStoreError::unique_violation(
                    block.kind.unique_constraint(),
                ));
            }
        }
        Ok(())
    }
}

/// Applies offset and limit, returning the page and the unpaged total.
fn paginate<T>(items: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> (Vec<T>, u32) {
    let total = items.len() as u32;
    let page = items
        .into_iter()
        .skip(offset.unwrap_or(0) as usize)
        .take(limit.map_or(usize::MAX, |l| l as usize))
        .collect();
    (page, total)
}

/// In-memory schedule store.
///
/// All tables sit behind one lock so cascades and constraint checks are
/// atomic with the write that triggers them.
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    tables: RwLock<Tables>,
}

impl MemoryScheduleStore {
    /// Creates a new in-memory schedule store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        user.validate()?;
        let user = user.at_record_precision();
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id)
            || tables.users.values().any(|u| u.username == user.username)
        {
            return Err(ScheduleStoreError::already_exists("User", &user.username));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self, filter: UserFilter) -> StoreResult<(Vec<User>, u32)> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, filter.limit, filter.offset))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let mut user = tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ScheduleStoreError::not_found("User", id))?;
        patch.apply(&mut user);
        user.validate()?;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(ScheduleStoreError::already_exists("User", &user.username));
        }
        user.updated_at = timestamp::now();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(ScheduleStoreError::not_found("User", id));
        }
        tables
            .contacts
            .retain(|_, c| c.user_id != id && c.contact_user_id != id);
        for kind in TimeblockKind::ALL {
            tables.timeblocks_mut(kind).retain(|_, b| b.user_id != id);
        }
        Ok(())
    }

    // =========================================================================
    // Contact operations
    // =========================================================================

    async fn create_contact(&self, contact: Contact) -> StoreResult<Contact> {
        let contact = contact.at_record_precision();
        let mut tables = self.tables.write().await;
        if tables.contacts.contains_key(&contact.id) {
            return Err(ScheduleStoreError::already_exists("Contact", contact.id));
        }
        tables.check_user_exists(contact.user_id)?;
        tables.check_user_exists(contact.contact_user_id)?;
        tables.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn get_contact(&self, id: Uuid) -> StoreResult<Option<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables.contacts.get(&id).cloned())
    }

    async fn list_contacts(&self, filter: ContactFilter) -> StoreResult<(Vec<Contact>, u32)> {
        let tables = self.tables.read().await;
        let mut contacts: Vec<Contact> = tables
            .contacts
            .values()
            .filter(|c| {
                filter.user_id.is_none_or(|id| c.user_id == id)
                    && (filter.include_removed || !c.removed)
            })
            .cloned()
            .collect();
        contacts.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.id.cmp(&b.id)));
        Ok(paginate(contacts, filter.limit, filter.offset))
    }

    async fn remove_contact(&self, id: Uuid) -> StoreResult<Contact> {
        let mut tables = self.tables.write().await;
        let contact = tables
            .contacts
            .get_mut(&id)
            .ok_or_else(|| ScheduleStoreError::not_found("Contact", id))?;
        contact.remove();
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.contacts.remove(&id).is_none() {
            return Err(ScheduleStoreError::not_found("Contact", id));
        }
        Ok(())
    }

    // =========================================================================
    // Event operations
    // =========================================================================

    async fn create_event(&self, event: Event) -> StoreResult<Event> {
        event.validate()?;
        let event = event.at_record_precision();
        let mut tables = self.tables.write().await;
        if tables.events.contains_key(&event.id) {
            return Err(ScheduleStoreError::already_exists("Event", event.id));
        }
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.get(&id).cloned())
    }

    async fn list_events(&self, filter: EventFilter) -> StoreResult<(Vec<Event>, u32)> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| {
                filter.event_type.is_none_or(|t| e.event_type == t)
                    && filter
                        .invitee_id
                        .as_deref()
                        .is_none_or(|invitee| e.invitee_id == invitee)
            })
            .cloned()
            .collect();
        events.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(events, filter.limit, filter.offset))
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;
        let mut event = tables
            .events
            .get(&id)
            .cloned()
            .ok_or_else(|| ScheduleStoreError::not_found("Event", id))?;
        patch.apply(&mut event);
        event.validate()?;
        event.updated_at = timestamp::now();
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.events.remove(&id).is_none() {
            return Err(ScheduleStoreError::not_found("Event", id));
        }
        for kind in TimeblockKind::ALL {
            for block in tables.timeblocks_mut(kind).values_mut() {
                if block.event_id == Some(id) {
                    block.event_id = None;
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Timeblock operations
    // =========================================================================

    async fn create_timeblock(&self, block: Timeblock) -> StoreResult<Timeblock> {
        block.validate()?;
        let mut tables = self.tables.write().await;
        if tables.timeblocks(block.kind).contains_key(&block.id) {
            return Err(ScheduleStoreError::already_exists(
                block.kind.entity_name(),
                block.id,
            ));
        }
        tables.check_timeblock(&block)?;
        tables
            .timeblocks_mut(block.kind)
            .insert(block.id, block.clone());
        Ok(block)
    }

    async fn get_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<Option<Timeblock>> {
        let tables = self.tables.read().await;
        Ok(tables.timeblocks(kind).get(&id).cloned())
    }

    async fn list_timeblocks(
        &self,
        kind: TimeblockKind,
        filter: TimeblockFilter,
    ) -> StoreResult<(Vec<Timeblock>, u32)> {
        let tables = self.tables.read().await;
        let mut blocks: Vec<Timeblock> = tables
            .timeblocks(kind)
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        blocks.sort_by(|a, b| {
            (a.date, a.start_time, a.end_time, a.id).cmp(&(b.date, b.start_time, b.end_time, b.id))
        });
        Ok(paginate(blocks, filter.limit, filter.offset))
    }

    async fn update_timeblock(
        &self,
        kind: TimeblockKind,
        id: Uuid,
        patch: TimeblockPatch,
    ) -> StoreResult<Timeblock> {
        let mut tables = self.tables.write().await;
        let mut block = tables
            .timeblocks(kind)
            .get(&id)
            .cloned()
            .ok_or_else(|| ScheduleStoreError::not_found(kind.entity_name(), id))?;
        patch.apply(&mut block);
        block.validate()?;
        tables.check_timeblock(&block)?;
        tables
            .timeblocks_mut(block.kind)
            .insert(block.id, block.clone());
        Ok(block)
    }

    async fn delete_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.timeblocks_mut(kind).remove(&id).is_none() {
            return Err(ScheduleStoreError::not_found(kind.entity_name(), id));
        }
        Ok(())
    }
}
