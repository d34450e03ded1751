//! Authentication handler implementations

use axum::extract::State;
use validator::Validate;

use crate::{
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthenticatedUser,
    response::ApiResponse,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
    response::{AuthResponse, LogoutResponse, UserResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    payload.check()?;

    let user = AuthService::register(state.db(), payload.into()).await?;

    Ok(ApiResponse::created(user.into()).with_message("User registered successfully"))
}

/// Login with username/email and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    payload.validate()?;

    let (user, tokens) = AuthService::login(
        state.db(),
        state.config(),
        &payload.identifier,
        &payload.password,
    )
    .await?;

    Ok(ApiResponse::success(AuthResponse::new(user, tokens)))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshTokenRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    payload.validate()?;

    let (user, tokens) =
        AuthService::refresh(state.db(), state.config(), &payload.refresh_token).await?;

    Ok(ApiResponse::success(AuthResponse::new(user, tokens)))
}

/// Revoke refresh tokens
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<LogoutRequest>,
) -> AppResult<ApiResponse<LogoutResponse>> {
    let revoked_tokens =
        AuthService::logout(state.db(), &auth_user.id, payload.refresh_token.as_deref()).await?;

    Ok(ApiResponse::success(LogoutResponse { revoked_tokens }).with_message("Logged out"))
}

/// Get current user info
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id).await?;
    Ok(ApiResponse::success(user.into()))
}
