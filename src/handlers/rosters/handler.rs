//! Roster handler implementations
//!
//! Committee and jury endpoints share one implementation parameterized by
//! [`RosterKind`]; the thin wrappers below pick the kind and the access rule.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    authorization,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthenticatedUser,
    models::{RosterKind, RosterMember},
    response::ApiResponse,
    services::{RosterService, roster_service::RosterAddOutcome},
    state::AppState,
    utils::{Page, PageQuery},
};

use super::{
    request::{AddMemberRequest, ConfirmQuery, UpdateMemberRequest},
    response::PendingResponse,
};

async fn list_members(
    state: &AppState,
    kind: RosterKind,
    event_id: Uuid,
    page: PageQuery,
) -> AppResult<ApiResponse<Page<RosterMember>>> {
    let members = RosterService::list(state.db(), kind, &event_id, page).await?;
    Ok(ApiResponse::success(members))
}

async fn add_member(
    state: &AppState,
    kind: RosterKind,
    event_id: Uuid,
    confirm: ConfirmQuery,
    payload: AddMemberRequest,
) -> AppResult<Response> {
    let AddMemberRequest { user } = payload;
    let username = user.username.clone();

    // Only a new account needs a full registration
    let outcome = RosterService::add(
        state.db(),
        kind,
        &event_id,
        &username,
        confirm.is_confirmed(),
        move || {
            user.check()?;
            Ok(user.into())
        },
    )
    .await?;

    let response = match outcome {
        RosterAddOutcome::Created(member) => ApiResponse::created(member).into_response(),
        RosterAddOutcome::Pending { hint } => {
            ApiResponse::pending(PendingResponse { yes: hint }).into_response()
        }
        RosterAddOutcome::Attached(summary) => ApiResponse::success(summary).into_response(),
    };
    Ok(response)
}

async fn get_member(
    state: &AppState,
    kind: RosterKind,
    event_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<RosterMember>> {
    let member = RosterService::get(state.db(), kind, &event_id, &id).await?;
    Ok(ApiResponse::success(member))
}

async fn update_member(
    state: &AppState,
    kind: RosterKind,
    event_id: Uuid,
    id: Uuid,
    payload: UpdateMemberRequest,
) -> AppResult<ApiResponse<RosterMember>> {
    payload.check()?;

    let member = RosterService::update(state.db(), kind, &event_id, &id, payload.into()).await?;
    Ok(ApiResponse::success(member))
}

async fn delete_member(
    state: &AppState,
    kind: RosterKind,
    event_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<()>> {
    RosterService::delete(state.db(), kind, &event_id, &id).await?;
    Ok(ApiResponse::success(()).with_message(format!("{} deleted", kind.label())))
}

// =============================================================================
// COMMITTEE
// =============================================================================

/// List the committee of an event
pub async fn list_committees(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(event_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<RosterMember>>> {
    authorization::require_staff(&auth_user, "list committee members")?;
    list_members(&state, RosterKind::Committee, event_id, page).await
}

/// Add a committee member, creating the account when the username is new
pub async fn add_committee(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(event_id): AppPath<Uuid>,
    AppQuery(confirm): AppQuery<ConfirmQuery>,
    AppJson(payload): AppJson<AddMemberRequest>,
) -> AppResult<Response> {
    authorization::require_staff(&auth_user, "add committee members")?;
    add_member(&state, RosterKind::Committee, event_id, confirm, payload).await
}

pub async fn get_committee(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<ApiResponse<RosterMember>> {
    get_member(&state, RosterKind::Committee, event_id, id).await
}

pub async fn update_committee(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateMemberRequest>,
) -> AppResult<ApiResponse<RosterMember>> {
    authorization::require_staff_or_committee(&auth_user, "update committee members")?;
    update_member(&state, RosterKind::Committee, event_id, id, payload).await
}

pub async fn delete_committee(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<ApiResponse<()>> {
    authorization::require_staff_or_committee(&auth_user, "delete committee members")?;
    delete_member(&state, RosterKind::Committee, event_id, id).await
}

// =============================================================================
// JURY
// =============================================================================

/// List the juries of an event
pub async fn list_juries(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath(event_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<RosterMember>>> {
    list_members(&state, RosterKind::Jury, event_id, page).await
}

/// Add a jury member, creating the account when the username is new
pub async fn add_jury(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(event_id): AppPath<Uuid>,
    AppQuery(confirm): AppQuery<ConfirmQuery>,
    AppJson(payload): AppJson<AddMemberRequest>,
) -> AppResult<Response> {
    authorization::require_staff_or_committee(&auth_user, "add jury members")?;
    add_member(&state, RosterKind::Jury, event_id, confirm, payload).await
}

pub async fn get_jury(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<ApiResponse<RosterMember>> {
    get_member(&state, RosterKind::Jury, event_id, id).await
}

pub async fn update_jury(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateMemberRequest>,
) -> AppResult<ApiResponse<RosterMember>> {
    authorization::require_staff_or_committee(&auth_user, "update jury members")?;
    update_member(&state, RosterKind::Jury, event_id, id, payload).await
}

pub async fn delete_jury(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<ApiResponse<()>> {
    authorization::require_staff_or_committee(&auth_user, "delete jury members")?;
    delete_member(&state, RosterKind::Jury, event_id, id).await
}
