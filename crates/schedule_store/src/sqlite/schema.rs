use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use entities::{
    Contact, Event, EventDuration, EventType, PreferenceType, Timeblock, TimeblockKind, User,
};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{ScheduleStoreError, StoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Formats a timestamp with a fixed number of fractional digits so stored
/// values sort chronologically as text.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_timestamp(table: &'static str, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ScheduleStoreError::corrupt_row(table, format!("timestamp {value:?}: {e}")))
}

fn parse_date(table: &'static str, value: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| ScheduleStoreError::corrupt_row(table, format!("date {value:?}: {e}")))
}

fn parse_time(table: &'static str, value: &str) -> StoreResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| ScheduleStoreError::corrupt_row(table, format!("time {value:?}: {e}")))
}

fn parse_uuid(table: &'static str, value: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| ScheduleStoreError::corrupt_row(table, format!("id {value:?}: {e}")))
}

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = ScheduleStoreError;

    fn try_from(row: UserRow) -> StoreResult<Self> {
        Ok(User {
            id: parse_uuid("users", &row.id)?,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            created_at: parse_timestamp("users", &row.created_at)?,
            updated_at: parse_timestamp("users", &row.updated_at)?,
        })
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
        }
    }
}

/// Database row for Contact
#[derive(Debug, FromRow)]
pub struct ContactRow {
    pub id: String,
    pub user_id: String,
    pub contact_user_id: String,
    pub added_at: String,
    pub removed: bool,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ScheduleStoreError;

    fn try_from(row: ContactRow) -> StoreResult<Self> {
        Ok(Contact {
            id: parse_uuid("contacts", &row.id)?,
            user_id: parse_uuid("contacts", &row.user_id)?,
            contact_user_id: parse_uuid("contacts", &row.contact_user_id)?,
            added_at: parse_timestamp("contacts", &row.added_at)?,
            removed: row.removed,
        })
    }
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            user_id: contact.user_id.to_string(),
            contact_user_id: contact.contact_user_id.to_string(),
            added_at: format_timestamp(&contact.added_at),
            removed: contact.removed,
        }
    }
}

/// Database row for Event
#[derive(Debug, FromRow)]
pub struct EventRow {
    pub id: String,
    pub event_title: String,
    pub event_duration: i64,
    pub event_type: String,
    pub description: String,
    pub invitee_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<EventRow> for Event {
    type Error = ScheduleStoreError;

    fn try_from(row: EventRow) -> StoreResult<Self> {
        let duration = EventDuration::from_minutes(row.event_duration)
            .map_err(|e| ScheduleStoreError::corrupt_row("events", e))?;
        let event_type = EventType::parse(&row.event_type).ok_or_else(|| {
            ScheduleStoreError::corrupt_row("events", format!("event_type {:?}", row.event_type))
        })?;

        Ok(Event {
            id: parse_uuid("events", &row.id)?,
            title: row.event_title,
            duration,
            event_type,
            description: row.description,
            invitee_id: row.invitee_id,
            created_at: parse_timestamp("events", &row.created_at)?,
            updated_at: parse_timestamp("events", &row.updated_at)?,
        })
    }
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            event_title: event.title.clone(),
            event_duration: event.duration.minutes(),
            event_type: event.event_type.as_str().to_string(),
            description: event.description.clone(),
            invitee_id: event.invitee_id.clone(),
            created_at: format_timestamp(&event.created_at),
            updated_at: format_timestamp(&event.updated_at),
        }
    }
}

/// Database row shared by both timeblock tables
#[derive(Debug, FromRow)]
pub struct TimeblockRow {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
    pub preference_type: String,
    pub is_finalized: bool,
    pub event_id: Option<String>,
    pub user_id: String,
}

impl TimeblockRow {
    pub fn into_timeblock(self, kind: TimeblockKind) -> StoreResult<Timeblock> {
        let table = kind.table_name();
        let preference_type = PreferenceType::parse(&self.preference_type).ok_or_else(|| {
            ScheduleStoreError::corrupt_row(
                table,
                format!("preference_type {:?}", self.preference_type),
            )
        })?;
        let event_id = self
            .event_id
            .as_deref()
            .map(|id| parse_uuid(table, id))
            .transpose()?;

        Ok(Timeblock {
            id: parse_uuid(table, &self.id)?,
            kind,
            event_id,
            user_id: parse_uuid(table, &self.user_id)?,
            date: parse_date(table, &self.date)?,
            start_time: parse_time(table, &self.start_time)?,
            end_time: parse_time(table, &self.end_time)?,
            preference_type,
            is_finalized: self.is_finalized,
        })
    }
}

impl From<&Timeblock> for TimeblockRow {
    fn from(block: &Timeblock) -> Self {
        Self {
            id: block.id.to_string(),
            start_time: format_time(&block.start_time),
            end_time: format_time(&block.end_time),
            date: format_date(&block.date),
            preference_type: block.preference_type.as_str().to_string(),
            is_finalized: block.is_finalized,
            event_id: block.event_id.map(|id| id.to_string()),
            user_id: block.user_id.to_string(),
        }
    }
}
