//! Timeblock entity definitions.
//!
//! Availability timeblocks and event timeblocks share one shape and live in
//! separate tables. [`TimeblockKind`] selects the table.

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};

/// How strongly a user prefers a timeblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceType {
    Low,
    Medium,
    High,
}

impl PreferenceType {
    /// Converts the preference to a string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a preference from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for PreferenceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidPreferenceType(s.to_string()))
    }
}

impl fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which timeblock table a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeblockKind {
    /// A candidate slot reported by a user.
    Availability,
    /// A slot associated with or finalized for an event.
    Event,
}

impl TimeblockKind {
    /// Both kinds.
    pub const ALL: [TimeblockKind; 2] = [Self::Availability, Self::Event];

    /// Converts the kind to a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Event => "event",
        }
    }

    /// Parses a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "availability" => Some(Self::Availability),
            "event" => Some(Self::Event),
            _ => None,
        }
    }

    /// Name of the backing table.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Availability => "availability_timeblocks",
            Self::Event => "event_timeblocks",
        }
    }

    /// Name of the uniqueness constraint on the backing table.
    pub fn unique_constraint(&self) -> &'static str {
        match self {
            Self::Availability => "unique_availability_timeblock",
            Self::Event => "unique_event_timeblock",
        }
    }

    /// Entity name used in error messages.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Availability => "AvailabilityTimeblock",
            Self::Event => "EventTimeblock",
        }
    }
}

impl FromStr for TimeblockKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidTimeblockKind(s.to_string()))
    }
}

impl fmt::Display for TimeblockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date and time range with a preference weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeblock {
    /// Unique identifier within its table.
    pub id: Uuid,
    /// Table this record lives in.
    pub kind: TimeblockKind,
    /// Associated event, cleared when the event is deleted.
    pub event_id: Option<Uuid>,
    /// Owning user.
    pub user_id: Uuid,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start of the range.
    pub start_time: NaiveTime,
    /// End of the range.
    pub end_time: NaiveTime,
    /// Preference weight.
    pub preference_type: PreferenceType,
    /// Whether the block has been confirmed.
    pub is_finalized: bool,
}

/// The columns covered by a timeblock table's uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeblockKey {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub preference_type: PreferenceType,
    pub is_finalized: bool,
}

impl Timeblock {
    /// Creates a new, unfinalized timeblock.
    pub fn new(
        kind: TimeblockKind,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        preference_type: PreferenceType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            event_id: None,
            user_id,
            date,
            start_time,
            end_time,
            preference_type,
            is_finalized: false,
        }
    }

    /// Creates a new availability timeblock.
    pub fn availability(
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        preference_type: PreferenceType,
    ) -> Self {
        Self::new(
            TimeblockKind::Availability,
            user_id,
            date,
            start_time,
            end_time,
            preference_type,
        )
    }

    /// Creates a new event timeblock.
    pub fn for_event(
        event_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        preference_type: PreferenceType,
    ) -> Self {
        Self::new(
            TimeblockKind::Event,
            user_id,
            date,
            start_time,
            end_time,
            preference_type,
        )
        .with_event(event_id)
    }

    /// Links the block to an event.
    pub fn with_event(mut self, event_id: Uuid) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Sets the finalization flag.
    pub fn with_finalized(mut self, is_finalized: bool) -> Self {
        self.is_finalized = is_finalized;
        self
    }

    /// Checks that the time range is not empty or inverted.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// The uniqueness key, or `None` when the block has no event.
    ///
    /// Null columns never compare equal inside a unique constraint, so a block
    /// without an event cannot collide with anything.
    pub fn unique_key(&self) -> Option<TimeblockKey> {
        self.event_id.map(|event_id| TimeblockKey {
            event_id,
            user_id: self.user_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            preference_type: self.preference_type,
            is_finalized: self.is_finalized,
        })
    }
}

/// Changes to a timeblock. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeblockPatch {
    /// `Some(None)` unlinks the block from its event.
    pub event_id: Option<Option<Uuid>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub preference_type: Option<PreferenceType>,
    pub is_finalized: Option<bool>,
}

impl TimeblockPatch {
    /// Writes the set fields into `block`.
    pub fn apply(self, block: &mut Timeblock) {
        if let Some(event_id) = self.event_id {
            block.event_id = event_id;
        }
        if let Some(date) = self.date {
            block.date = date;
        }
        if let Some(start_time) = self.start_time {
            block.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            block.end_time = end_time;
        }
        if let Some(preference_type) = self.preference_type {
            block.preference_type = preference_type;
        }
        if let Some(is_finalized) = self.is_finalized {
            block.is_finalized = is_finalized;
        }
    }
}
