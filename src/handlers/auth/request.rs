//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        MAX_ADDRESS_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_REGION_LENGTH,
        MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
    },
    error::{AppError, AppResult},
    services::auth_service::Registration,
    utils::validation::{
        sanitize_string, validate_password, validate_password_confirmation, validate_phone,
        validate_username,
    },
};

/// Account payload, used for self-registration and nested under `user` when
/// adding a committee or jury member.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    /// Must repeat `password`
    pub password2: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    #[serde(default)]
    pub last_name: String,

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

impl RegisterRequest {
    /// Run derive and format checks
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;

        validate_username(&self.username).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_password(&self.password).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_password_confirmation(&self.password, &self.password2)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(phone) = &self.phone_number {
            validate_phone(phone).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        Ok(())
    }
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            email: req.email.unwrap_or_default(),
            password: req.password,
            first_name: sanitize_string(&req.first_name),
            last_name: sanitize_string(&req.last_name),
            phone_number: req.phone_number,
            address: req.address.as_deref().map(sanitize_string),
            city: req.city.as_deref().map(sanitize_string),
            state: req.state.as_deref().map(sanitize_string),
            photo_url: req.photo_url,
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Can be either username or email
    #[validate(length(min = 1))]
    #[serde(alias = "username")]
    pub identifier: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Logout request. Without a token every session of the user is revoked.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}
