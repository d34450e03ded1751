//! Admin handler implementations

use axum::extract::State;
use uuid::Uuid;

use crate::{
    authorization,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    handlers::auth::UserResponse,
    middleware::auth::AuthenticatedUser,
    response::ApiResponse,
    services::AdminService,
    state::AppState,
    utils::Page,
};

use super::request::{UpdateRolesRequest, UserListQuery};

/// List user accounts
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppQuery(query): AppQuery<UserListQuery>,
) -> AppResult<ApiResponse<Page<UserResponse>>> {
    authorization::require_staff(&auth_user, "list users")?;

    let users = AdminService::list_users(state.db(), query.role()?, query.page()).await?;
    Ok(ApiResponse::success(users.map(UserResponse::from)))
}

/// Replace a user's roles
pub async fn update_user_roles(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateRolesRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    authorization::require_staff(&auth_user, "change user roles")?;

    let user =
        AdminService::set_roles(state.db(), &auth_user.id, &user_id, payload.role_set()?).await?;
    Ok(ApiResponse::success(user.into()).with_message("Roles updated"))
}
