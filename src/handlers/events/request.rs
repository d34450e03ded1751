//! Event request DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MAX_TITLE_LENGTH,
    models::{EventChanges, NewEvent},
    utils::validation::sanitize_string,
};

/// Create event request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,

    #[validate(range(min = 0))]
    pub max_participants: i32,

    #[validate(range(min = 0))]
    pub num_jury: i32,

    #[validate(range(min = 0))]
    pub num_committee: i32,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub event_level: String,
}

impl CreateEventRequest {
    /// Clean the text fields so length rules apply to what gets stored
    pub fn normalize(&mut self) {
        self.title = sanitize_string(&self.title);
        self.event_level = sanitize_string(&self.event_level);
    }

    pub fn into_new_event(self, author_id: Uuid) -> NewEvent {
        NewEvent {
            author_id,
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            max_participants: self.max_participants,
            num_jury: self.num_jury,
            num_committee: self.num_committee,
            event_level: self.event_level,
        }
    }
}

/// Update event request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    #[validate(range(min = 0))]
    pub max_participants: Option<i32>,

    #[validate(range(min = 0))]
    pub num_jury: Option<i32>,

    #[validate(range(min = 0))]
    pub num_committee: Option<i32>,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub event_level: Option<String>,
}

impl UpdateEventRequest {
    /// Clean the text fields so length rules apply to what gets stored
    pub fn normalize(&mut self) {
        if let Some(title) = self.title.as_mut() {
            *title = sanitize_string(title);
        }
        if let Some(level) = self.event_level.as_mut() {
            *level = sanitize_string(level);
        }
    }
}

impl From<UpdateEventRequest> for EventChanges {
    fn from(req: UpdateEventRequest) -> Self {
        EventChanges {
            title: req.title,
            start_date: req.start_date,
            end_date: req.end_date,
            start_time: req.start_time,
            end_time: req.end_time,
            max_participants: req.max_participants,
            num_jury: req.num_jury,
            num_committee: req.num_committee,
            event_level: req.event_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_parses_date_and_time() {
        let mut req: CreateEventRequest = serde_json::from_value(json!({
            "title": " Robotics Cup ",
            "start_date": "2024-10-01",
            "end_date": "2024-10-02",
            "start_time": "08:00:00",
            "end_time": "17:30:00",
            "max_participants": 40,
            "num_jury": 4,
            "num_committee": 2,
            "event_level": "national"
        }))
        .unwrap();
        req.normalize();
        assert!(req.validate().is_ok());

        let event = req.into_new_event(Uuid::nil());
        assert_eq!(event.title, "Robotics Cup");
        assert_eq!(event.end_time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn test_negative_capacity_fails_validation() {
        let req: UpdateEventRequest =
            serde_json::from_value(json!({"num_jury": -1})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_title_fails_after_cleaning() {
        let mut req: UpdateEventRequest =
            serde_json::from_value(json!({"title": "   ", "event_level": " national "})).unwrap();
        req.normalize();
        assert!(req.validate().is_err());
        assert_eq!(req.event_level.as_deref(), Some("national"));
    }
}
