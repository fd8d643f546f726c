//! Event entity definitions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{check_text, ValidationError, ValidationResult};
use crate::timestamp;

/// Maximum length of an event title.
pub const EVENT_TITLE_MAX_LEN: usize = 255;

/// Length of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum EventDuration {
    Minutes15,
    Minutes30,
    Minutes45,
    Minutes60,
    Minutes90,
    Minutes120,
}

impl EventDuration {
    /// Every allowed duration, shortest first.
    pub const ALL: [EventDuration; 6] = [
        Self::Minutes15,
        Self::Minutes30,
        Self::Minutes45,
        Self::Minutes60,
        Self::Minutes90,
        Self::Minutes120,
    ];

    /// Length in minutes.
    pub fn minutes(self) -> i64 {
        match self {
            Self::Minutes15 => 15,
            Self::Minutes30 => 30,
            Self::Minutes45 => 45,
            Self::Minutes60 => 60,
            Self::Minutes90 => 90,
            Self::Minutes120 => 120,
        }
    }

    /// Parses a duration in minutes.
    pub fn from_minutes(minutes: i64) -> ValidationResult<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.minutes() == minutes)
            .ok_or(ValidationError::InvalidDuration(minutes))
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Minutes15 => "15 minutes",
            Self::Minutes30 => "30 minutes",
            Self::Minutes45 => "45 minutes",
            Self::Minutes60 => "60 minutes",
            Self::Minutes90 => "90 minutes",
            Self::Minutes120 => "120 minutes",
        }
    }
}

impl TryFrom<i64> for EventDuration {
    type Error = ValidationError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<EventDuration> for i64 {
    fn from(duration: EventDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for EventDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a meeting takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    InPerson,
    Phone,
    Video,
}

impl EventType {
    /// Converts the type to a string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "in_person",
            Self::Phone => "phone",
            Self::Video => "video",
        }
    }

    /// Parses a type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_person" => Some(Self::InPerson),
            "phone" => Some(Self::Phone),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InPerson => "In Person",
            Self::Phone => "Phone",
            Self::Video => "Video",
        }
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidEventType(s.to_string()))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable meeting template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: Uuid,
    /// Title shown to participants.
    pub title: String,
    /// Meeting length.
    pub duration: EventDuration,
    /// Meeting format.
    pub event_type: EventType,
    /// Free-form description.
    pub description: String,
    /// Opaque identifier of the invited party. Not necessarily a user.
    pub invitee_id: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event.
    pub fn new(
        title: impl Into<String>,
        duration: EventDuration,
        event_type: EventType,
        invitee_id: impl Into<String>,
    ) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            duration,
            event_type,
            description: String::new(),
            invitee_id: invitee_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks the free-text fields.
    pub fn validate(&self) -> ValidationResult<()> {
        check_text("event_title", &self.title, EVENT_TITLE_MAX_LEN)
    }

    /// Cuts the timestamps to record precision.
    pub fn at_record_precision(mut self) -> Self {
        self.created_at = timestamp::truncate(self.created_at);
        self.updated_at = timestamp::truncate(self.updated_at);
        self
    }
}

/// Changes to an event. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub duration: Option<EventDuration>,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
    pub invitee_id: Option<String>,
}

impl EventPatch {
    /// Writes the set fields into `event`.
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(duration) = self.duration {
            event.duration = duration;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(invitee_id) = self.invitee_id {
            event.invitee_id = invitee_id;
        }
    }
}

/// Unvalidated event input as it arrives from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub event_title: String,
    pub event_duration: i64,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    pub invitee_id: String,
}

impl NewEvent {
    /// Validates the raw input and builds an [`Event`].
    pub fn validate(self) -> ValidationResult<Event> {
        let duration = EventDuration::from_minutes(self.event_duration)?;
        let event_type: EventType = self.event_type.parse()?;
        let event = Event::new(self.event_title, duration, event_type, self.invitee_id)
            .with_description(self.description);
        event.validate()?;
        Ok(event)
    }
}
