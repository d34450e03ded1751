//! Participant request DTOs

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    constants::{MAX_PARTICIPANT_CODE_LENGTH, MAX_REGION_LENGTH},
    error::{AppError, AppResult},
    models::{NewParticipant, ParticipantChanges},
    utils::validation::{sanitize_string, validate_participant_code},
};

/// Register a participant under a jury
#[derive(Debug, Deserialize, Validate)]
pub struct CreateParticipantRequest {
    #[validate(length(min = 1, max = MAX_PARTICIPANT_CODE_LENGTH))]
    pub code: String,

    #[validate(length(min = 1, max = MAX_REGION_LENGTH))]
    pub full_name: String,

    #[validate(range(min = 0))]
    pub age: Option<i32>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = MAX_REGION_LENGTH))]
    #[serde(default)]
    pub institute: String,

    #[validate(url)]
    pub photo_url: Option<String>,
}

impl CreateParticipantRequest {
    /// Trim the code and clean the free-text fields before validation
    pub fn normalize(&mut self) {
        self.code = self.code.trim().to_string();
        self.full_name = sanitize_string(&self.full_name);
        self.institute = sanitize_string(&self.institute);
    }

    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        validate_participant_code(&self.code).map_err(|e| AppError::Validation(e.to_string()))
    }
}

impl From<CreateParticipantRequest> for NewParticipant {
    fn from(req: CreateParticipantRequest) -> Self {
        NewParticipant {
            code: req.code,
            full_name: req.full_name,
            age: req.age,
            email: req.email,
            institute: req.institute,
            photo_url: req.photo_url,
        }
    }
}

/// Partial participant update. Score fields are for the assigned jury only.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = MAX_PARTICIPANT_CODE_LENGTH))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = MAX_REGION_LENGTH))]
    pub full_name: Option<String>,

    #[validate(range(min = 0))]
    pub age: Option<i32>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = MAX_REGION_LENGTH))]
    pub institute: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,

    pub total_score: Option<f64>,

    pub score_field: Option<Value>,
}

impl UpdateParticipantRequest {
    /// Trim the code and clean the free-text fields before validation
    pub fn normalize(&mut self) {
        if let Some(code) = self.code.as_mut() {
            *code = code.trim().to_string();
        }
        if let Some(name) = self.full_name.as_mut() {
            *name = sanitize_string(name);
        }
        if let Some(institute) = self.institute.as_mut() {
            *institute = sanitize_string(institute);
        }
    }

    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if let Some(code) = &self.code {
            validate_participant_code(code).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if self.total_score.is_some_and(|score| !score.is_finite()) {
            return Err(AppError::Validation(
                "total_score must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<UpdateParticipantRequest> for ParticipantChanges {
    fn from(req: UpdateParticipantRequest) -> Self {
        ParticipantChanges {
            code: req.code,
            full_name: req.full_name,
            age: req.age,
            email: req.email,
            institute: req.institute,
            photo_url: req.photo_url,
            total_score: req.total_score,
            score_field: req.score_field,
        }
    }
}
