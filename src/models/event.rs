//! Event model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Event database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_participants: i32,
    pub num_jury: i32,
    pub num_committee: i32,
    pub event_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A capacity-limited roster on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSlot {
    Committee,
    Jury,
    Participant,
}

impl RosterSlot {
    pub fn label(self) -> &'static str {
        match self {
            RosterSlot::Committee => "committee",
            RosterSlot::Jury => "jury",
            RosterSlot::Participant => "participant",
        }
    }
}

impl Event {
    /// Configured maximum for a roster
    pub fn limit(&self, slot: RosterSlot) -> i64 {
        let limit = match slot {
            RosterSlot::Committee => self.num_committee,
            RosterSlot::Jury => self.num_jury,
            RosterSlot::Participant => self.max_participants,
        };
        i64::from(limit.max(0))
    }

    /// Whether one more member fits on the roster
    pub fn has_room(&self, slot: RosterSlot, current: i64) -> bool {
        current < self.limit(slot)
    }
}

/// Insertable event fields
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub author_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_participants: i32,
    pub num_jury: i32,
    pub num_committee: i32,
    pub event_level: String,
}

/// Partial event update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub max_participants: Option<i32>,
    pub num_jury: Option<i32>,
    pub num_committee: Option<i32>,
    pub event_level: Option<String>,
}

impl EventChanges {
    /// Event as it would look after applying the changes
    pub fn apply_to(&self, event: &Event) -> Event {
        Event {
            title: self.title.clone().unwrap_or_else(|| event.title.clone()),
            start_date: self.start_date.unwrap_or(event.start_date),
            end_date: self.end_date.unwrap_or(event.end_date),
            start_time: self.start_time.unwrap_or(event.start_time),
            end_time: self.end_time.unwrap_or(event.end_time),
            max_participants: self.max_participants.unwrap_or(event.max_participants),
            num_jury: self.num_jury.unwrap_or(event.num_jury),
            num_committee: self.num_committee.unwrap_or(event.num_committee),
            event_level: self
                .event_level
                .clone()
                .unwrap_or_else(|| event.event_level.clone()),
            ..event.clone()
        }
    }
}

/// Site-wide totals shown next to the event list
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EventStatistics {
    pub total_event: i64,
    pub total_participants: i64,
    pub total_jury: i64,
    pub total_committee: i64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn event(max_participants: i32, num_jury: i32, num_committee: i32) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "Regional Olympiad".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            max_participants,
            num_jury,
            num_committee,
            event_level: "regional".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
