//! Participant model

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// Participant database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: Uuid,
    pub code: String,
    pub full_name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub institute: String,
    pub total_score: Option<f64>,
    pub score_field: Option<Json<Value>>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable participant fields. Scores start empty.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub code: String,
    pub full_name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub institute: String,
    pub photo_url: Option<String>,
}

/// Partial participant update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ParticipantChanges {
    pub code: Option<String>,
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub institute: Option<String>,
    pub photo_url: Option<String>,
    pub total_score: Option<f64>,
    pub score_field: Option<Value>,
}

impl ParticipantChanges {
    pub fn touches_scores(&self) -> bool {
        self.total_score.is_some() || self.score_field.is_some()
    }

    pub fn touches_profile(&self) -> bool {
        self.code.is_some()
            || self.full_name.is_some()
            || self.age.is_some()
            || self.email.is_some()
            || self.institute.is_some()
            || self.photo_url.is_some()
    }

    /// Fill in `total_score` from `score_field` when only the breakdown is given
    pub fn with_derived_total(mut self) -> Self {
        if self.total_score.is_none() {
            self.total_score = self.score_field.as_ref().map(sum_scores);
        }
        self
    }
}

/// Sum of the top-level numeric values of a score breakdown.
///
/// Numeric strings count too; anything else is skipped.
pub fn sum_scores(score_field: &Value) -> f64 {
    match score_field {
        Value::Object(map) => map.values().filter_map(score_value).sum(),
        _ => 0.0,
    }
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sum_scores() {
        let scores = json!({"creativity": 8.5, "technique": 9, "notes": "good", "bonus": "1.5"});
        assert_eq!(sum_scores(&scores), 19.0);
        assert_eq!(sum_scores(&json!({})), 0.0);
        assert_eq!(sum_scores(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_derived_total_only_when_missing() {
        let changes = ParticipantChanges {
            score_field: Some(json!({"a": 1, "b": 2})),
            ..Default::default()
        }
        .with_derived_total();
        assert_eq!(changes.total_score, Some(3.0));

        let changes = ParticipantChanges {
            score_field: Some(json!({"a": 1, "b": 2})),
            total_score: Some(42.0),
            ..Default::default()
        }
        .with_derived_total();
        assert_eq!(changes.total_score, Some(42.0));
    }

    #[test]
    fn test_touches() {
        let changes = ParticipantChanges {
            full_name: Some("Budi".to_string()),
            ..Default::default()
        };
        assert!(changes.touches_profile());
        assert!(!changes.touches_scores());

        let changes = ParticipantChanges {
            total_score: Some(1.0),
            ..Default::default()
        };
        assert!(changes.touches_scores());
        assert!(!changes.touches_profile());
    }
}
