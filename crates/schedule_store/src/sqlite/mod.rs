//! SQLite-backed schedule store.

mod schema;

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use entities::{
    Contact, Event, EventPatch, Timeblock, TimeblockKind, TimeblockPatch, User, UserPatch,
    timestamp,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, QueryBuilder, Sqlite,
};
use uuid::Uuid;

use self::schema::*;
use crate::{
    ContactFilter, EventFilter, ScheduleStore, ScheduleStoreError, StoreResult, TimeblockFilter,
    UserFilter,
};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, phone_number, created_at, updated_at";
const CONTACT_COLUMNS: &str = "id, user_id, contact_user_id, added_at, removed";
const EVENT_COLUMNS: &str = "id, event_title, event_duration, event_type, description, \
                             invitee_id, created_at, updated_at";
const TIMEBLOCK_COLUMNS: &str =
    "id, start_time, end_time, date, preference_type, is_finalized, event_id, user_id";

/// Schedule store on a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteScheduleStore {
    pool: Pool<Sqlite>,
}

impl SqliteScheduleStore {
    /// Connects to `url` (e.g. `sqlite:data.db?mode=rwc`) and creates the
    /// schema if needed.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to an in-memory database opens a fresh, empty one,
        // so the pool must hold exactly one connection forever.
        let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.run_migrations().await?;

        tracing::info!(url, "SQLite schedule store ready");
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Runs database migrations
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| ScheduleStoreError::Migration(e.to_string()))?;
        Ok(())
    }
}

/// Turns a unique violation into `AlreadyExists` for tables whose only
/// unique columns identify the record.
fn duplicate_as_exists(
    err: sqlx::Error,
    entity_type: &'static str,
    id: impl ToString,
) -> ScheduleStoreError {
    match ScheduleStoreError::from(err) {
        ScheduleStoreError::UniqueViolation { .. } => {
            ScheduleStoreError::already_exists(entity_type, id)
        }
        other => other,
    }
}

/// Classifies a failed timeblock write: a primary key clash is a duplicate
/// record, any other unique violation is the seven-column constraint.
fn timeblock_write_error(err: sqlx::Error, block: &Timeblock) -> ScheduleStoreError {
    let pk_column = format!("{}.id", block.kind.table_name());
    match ScheduleStoreError::from(err) {
        ScheduleStoreError::UniqueViolation { constraint } if constraint.ends_with(&pk_column) => {
            ScheduleStoreError::already_exists(block.kind.entity_name(), block.id)
        }
        ScheduleStoreError::UniqueViolation { .. } => {
            ScheduleStoreError::unique_violation(block.kind.unique_constraint())
        }
        other => other,
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, limit: Option<u32>, offset: Option<u32>) {
    // SQLite treats a negative LIMIT as "no limit".
    qb.push(" LIMIT ")
        .push_bind(limit.map_or(-1, i64::from))
        .push(" OFFSET ")
        .push_bind(i64::from(offset.unwrap_or(0)));
}

fn push_contact_conditions(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ContactFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id.to_string());
    }
    if !filter.include_removed {
        qb.push(" AND removed = 0");
    }
}

fn push_event_conditions(qb: &mut QueryBuilder<'_, Sqlite>, filter: &EventFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(event_type) = filter.event_type {
        qb.push(" AND event_type = ").push_bind(event_type.as_str());
    }
    if let Some(invitee_id) = &filter.invitee_id {
        qb.push(" AND invitee_id = ").push_bind(invitee_id.clone());
    }
}

fn push_timeblock_conditions(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TimeblockFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id.to_string());
    }
    if let Some(event_id) = filter.event_id {
        qb.push(" AND event_id = ").push_bind(event_id.to_string());
    }
    if let Some(date) = filter.date {
        qb.push(" AND date = ").push_bind(format_date(&date));
    }
    if let Some(is_finalized) = filter.is_finalized {
        qb.push(" AND is_finalized = ").push_bind(is_finalized);
    }
}

fn count(total: i64) -> u32 {
    u32::try_from(total).unwrap_or(u32::MAX)
}

#[async_trait]
impl ScheduleStore for SqliteScheduleStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        user.validate()?;
        let user = user.at_record_precision();
        let row = UserRow::from(&user);

        sqlx::query(
            "INSERT INTO users (id, username, email, first_name, last_name, phone_number, \
             created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.username)
        .bind(&row.email)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.phone_number)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_as_exists(e, "User", &user.username))?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self, filter: UserFilter) -> StoreResult<(Vec<User>, u32)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"));
        push_page(&mut qb, filter.limit, filter.offset);
        let rows: Vec<UserRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<StoreResult<Vec<_>>>()?;
        Ok((users, count(total)))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
        let mut tx = self.pool.begin().await?;

        // Stamping first takes the write lock before the row is read.
        let result = sqlx::query("UPDATE users SET updated_at = ? WHERE id = ?")
            .bind(format_timestamp(&timestamp::now()))
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found("User", id));
        }

        let row: UserRow =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await?;
        let mut user = User::try_from(row)?;
        patch.apply(&mut user);
        user.validate()?;
        let row = UserRow::from(&user);

        sqlx::query(
            "UPDATE users SET username = ?, email = ?, first_name = ?, last_name = ?, \
             phone_number = ?
             WHERE id = ?",
        )
        .bind(&row.username)
        .bind(&row.email)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.phone_number)
        .bind(&row.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_as_exists(e, "User", &user.username))?;

        tx.commit().await?;
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        // Contacts and timeblocks go with the user through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found("User", id));
        }
        tracing::debug!(user_id = %id, "User deleted with cascade");
        Ok(())
    }

    // =========================================================================
    // Contact operations
    // =========================================================================

    async fn create_contact(&self, contact: Contact) -> StoreResult<Contact> {
        let contact = contact.at_record_precision();
        let row = ContactRow::from(&contact);

        sqlx::query(
            "INSERT INTO contacts (id, user_id, contact_user_id, added_at, removed)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.contact_user_id)
        .bind(&row.added_at)
        .bind(row.removed)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_as_exists(e, "Contact", contact.id))?;

        Ok(contact)
    }

    async fn get_contact(&self, id: Uuid) -> StoreResult<Option<Contact>> {
        let row: Option<ContactRow> =
            sqlx::query_as(&format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Contact::try_from).transpose()
    }

    async fn list_contacts(&self, filter: ContactFilter) -> StoreResult<(Vec<Contact>, u32)> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
        push_contact_conditions(&mut count_qb, &filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {CONTACT_COLUMNS} FROM contacts"));
        push_contact_conditions(&mut qb, &filter);
        qb.push(" ORDER BY added_at, id");
        push_page(&mut qb, filter.limit, filter.offset);
        let rows: Vec<ContactRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let contacts = rows
            .into_iter()
            .map(Contact::try_from)
            .collect::<StoreResult<Vec<_>>>()?;
        Ok((contacts, count(total)))
    }

    async fn remove_contact(&self, id: Uuid) -> StoreResult<Contact> {
        let row: Option<ContactRow> = sqlx::query_as(&format!(
            "UPDATE contacts SET removed = 1 WHERE id = ? RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Contact::try_from)
            .transpose()?
            .ok_or_else(|| ScheduleStoreError::not_found("Contact", id))
    }

    async fn delete_contact(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
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
        let row = EventRow::from(&event);

        sqlx::query(
            "INSERT INTO events (id, event_title, event_duration, event_type, description, \
             invitee_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.event_title)
        .bind(row.event_duration)
        .bind(&row.event_type)
        .bind(&row.description)
        .bind(&row.invitee_id)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_as_exists(e, "Event", event.id))?;

        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Event::try_from).transpose()
    }

    async fn list_events(&self, filter: EventFilter) -> StoreResult<(Vec<Event>, u32)> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM events");
        push_event_conditions(&mut count_qb, &filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {EVENT_COLUMNS} FROM events"));
        push_event_conditions(&mut qb, &filter);
        qb.push(" ORDER BY created_at, id");
        push_page(&mut qb, filter.limit, filter.offset);
        let rows: Vec<EventRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let events = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<StoreResult<Vec<_>>>()?;
        Ok((events, count(total)))
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        let mut tx = self.pool.begin().await?;

        // Stamping first takes the write lock before the row is read.
        let result = sqlx::query("UPDATE events SET updated_at = ? WHERE id = ?")
            .bind(format_timestamp(&timestamp::now()))
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found("Event", id));
        }

        let row: EventRow =
            sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"))
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await?;
        let mut event = Event::try_from(row)?;
        patch.apply(&mut event);
        event.validate()?;
        let row = EventRow::from(&event);

        sqlx::query(
            "UPDATE events SET event_title = ?, event_duration = ?, event_type = ?, \
             description = ?, invitee_id = ?
             WHERE id = ?",
        )
        .bind(&row.event_title)
        .bind(row.event_duration)
        .bind(&row.event_type)
        .bind(&row.description)
        .bind(&row.invitee_id)
        .bind(&row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        // Referencing timeblocks keep their rows; ON DELETE SET NULL clears the link.
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found("Event", id));
        }
        tracing::debug!(event_id = %id, "Event deleted, timeblocks unlinked");
        Ok(())
    }

    // =========================================================================
    // Timeblock operations
    // =========================================================================

    async fn create_timeblock(&self, block: Timeblock) -> StoreResult<Timeblock> {
        block.validate()?;
        let row = TimeblockRow::from(&block);

        sqlx::query(&format!(
            "INSERT INTO {} ({TIMEBLOCK_COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            block.kind.table_name()
        ))
        .bind(&row.id)
        .bind(&row.start_time)
        .bind(&row.end_time)
        .bind(&row.date)
        .bind(&row.preference_type)
        .bind(row.is_finalized)
        .bind(&row.event_id)
        .bind(&row.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| timeblock_write_error(e, &block))?;

        Ok(block)
    }

    async fn get_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<Option<Timeblock>> {
        let row: Option<TimeblockRow> = sqlx::query_as(&format!(
            "SELECT {TIMEBLOCK_COLUMNS} FROM {} WHERE id = ?",
            kind.table_name()
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_timeblock(kind)).transpose()
    }

    async fn list_timeblocks(
        &self,
        kind: TimeblockKind,
        filter: TimeblockFilter,
    ) -> StoreResult<(Vec<Timeblock>, u32)> {
        let mut count_qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", kind.table_name()));
        push_timeblock_conditions(&mut count_qb, &filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(format!(
            "SELECT {TIMEBLOCK_COLUMNS} FROM {}",
            kind.table_name()
        ));
        push_timeblock_conditions(&mut qb, &filter);
        qb.push(" ORDER BY date, start_time, end_time, id");
        push_page(&mut qb, filter.limit, filter.offset);
        let rows: Vec<TimeblockRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let blocks = rows
            .into_iter()
            .map(|r| r.into_timeblock(kind))
            .collect::<StoreResult<Vec<_>>>()?;
        Ok((blocks, count(total)))
    }

    async fn update_timeblock(
        &self,
        kind: TimeblockKind,
        id: Uuid,
        patch: TimeblockPatch,
    ) -> StoreResult<Timeblock> {
        let mut tx = self.pool.begin().await?;

        // A no-op write takes the write lock before the row is read.
        let result = sqlx::query(&format!(
            "UPDATE {} SET id = id WHERE id = ?",
            kind.table_name()
        ))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found(kind.entity_name(), id));
        }

        let row: TimeblockRow = sqlx::query_as(&format!(
            "SELECT {TIMEBLOCK_COLUMNS} FROM {} WHERE id = ?",
            kind.table_name()
        ))
        .bind(id.to_string())
        .fetch_one(&mut *tx)
        .await?;
        let mut block = row.into_timeblock(kind)?;
        patch.apply(&mut block);
        block.validate()?;
        let row = TimeblockRow::from(&block);

        sqlx::query(&format!(
            "UPDATE {} SET start_time = ?, end_time = ?, date = ?, preference_type = ?, \
             is_finalized = ?, event_id = ?, user_id = ?
             WHERE id = ?",
            block.kind.table_name()
        ))
        .bind(&row.start_time)
        .bind(&row.end_time)
        .bind(&row.date)
        .bind(&row.preference_type)
        .bind(row.is_finalized)
        .bind(&row.event_id)
        .bind(&row.user_id)
        .bind(&row.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| timeblock_write_error(e, &block))?;

        tx.commit().await?;
        Ok(block)
    }

    async fn delete_timeblock(&self, kind: TimeblockKind, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", kind.table_name()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ScheduleStoreError::not_found(kind.entity_name(), id));
        }
        Ok(())
    }
}

/// SQL schema definition
const SCHEMA_SQL: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    phone_number TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Contacts table (soft-deleted through `removed`)
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    contact_user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    added_at TEXT NOT NULL,
    removed INTEGER NOT NULL DEFAULT 0
);

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY NOT NULL,
    event_title TEXT NOT NULL CHECK (length(event_title) BETWEEN 1 AND 255),
    event_duration INTEGER NOT NULL CHECK (event_duration IN (15, 30, 45, 60, 90, 120)),
    event_type TEXT NOT NULL CHECK (event_type IN ('in_person', 'phone', 'video')),
    description TEXT NOT NULL,
    invitee_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Availability timeblocks table
CREATE TABLE IF NOT EXISTS availability_timeblocks (
    id TEXT PRIMARY KEY NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    date TEXT NOT NULL,
    preference_type TEXT NOT NULL CHECK (preference_type IN ('low', 'medium', 'high')),
    is_finalized INTEGER NOT NULL DEFAULT 0,
    event_id TEXT REFERENCES events(id) ON DELETE SET NULL,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    CONSTRAINT unique_availability_timeblock
        UNIQUE (event_id, user_id, date, start_time, end_time, preference_type, is_finalized)
);

-- Event timeblocks table
CREATE TABLE IF NOT EXISTS event_timeblocks (
    id TEXT PRIMARY KEY NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    date TEXT NOT NULL,
    preference_type TEXT NOT NULL CHECK (preference_type IN ('low', 'medium', 'high')),
    is_finalized INTEGER NOT NULL DEFAULT 0,
    event_id TEXT REFERENCES events(id) ON DELETE SET NULL,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    CONSTRAINT unique_event_timeblock
        UNIQUE (event_id, user_id, date, start_time, end_time, preference_type, is_finalized)
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_contacts_user ON contacts(user_id);
CREATE INDEX IF NOT EXISTS idx_contacts_contact_user ON contacts(contact_user_id);
CREATE INDEX IF NOT EXISTS idx_contacts_added_at ON contacts(added_at);
CREATE INDEX IF NOT EXISTS idx_availability_timeblocks_user ON availability_timeblocks(user_id);
CREATE INDEX IF NOT EXISTS idx_event_timeblocks_user ON event_timeblocks(user_id);
CREATE INDEX IF NOT EXISTS idx_event_timeblocks_event ON event_timeblocks(event_id);
"#;
