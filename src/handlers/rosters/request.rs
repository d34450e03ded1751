//! Roster request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        CONFIRM_FLAG, MAX_ADDRESS_LENGTH, MAX_NAME_LENGTH, MAX_REGION_LENGTH,
    },
    error::{AppError, AppResult},
    handlers::auth::RegisterRequest,
    models::UserProfileChanges,
    utils::validation::{sanitize_string, validate_phone},
};

/// Add a committee or jury member. The account fields sit under `user`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(nested)]
    pub user: RegisterRequest,
}

/// `?confirm=1` attaches an existing user instead of answering Pending
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    pub confirm: Option<String>,
}

impl ConfirmQuery {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some(CONFIRM_FLAG)
    }
}

/// Profile fields of the member's account
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MemberProfileRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: Option<String>,

    pub phone_number: Option<String>,

    #[validate(length(max = MAX_ADDRESS_LENGTH))]
    pub address: Option<String>,

    #[validate(length(max = MAX_REGION_LENGTH))]
    pub city: Option<String>,

    #[validate(length(max = MAX_REGION_LENGTH))]
    pub state: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,
}

/// Update a committee or jury member
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(nested)]
    #[serde(default)]
    pub user: MemberProfileRequest,
}

impl UpdateMemberRequest {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if let Some(phone) = &self.user.phone_number {
            validate_phone(phone).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        Ok(())
    }
}

impl From<UpdateMemberRequest> for UserProfileChanges {
    fn from(req: UpdateMemberRequest) -> Self {
        let user = req.user;
        UserProfileChanges {
            email: user.email,
            first_name: user.first_name.as_deref().map(sanitize_string),
            last_name: user.last_name.as_deref().map(sanitize_string),
            phone_number: user.phone_number,
            address: user.address.as_deref().map(sanitize_string),
            city: user.city.as_deref().map(sanitize_string),
            state: user.state.as_deref().map(sanitize_string),
            photo_url: user.photo_url,
        }
    }
}
