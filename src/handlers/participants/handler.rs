//! Participant handler implementations

use axum::extract::State;
use uuid::Uuid;

use crate::{
    authorization,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthenticatedUser,
    models::Participant,
    response::ApiResponse,
    services::ParticipantService,
    state::AppState,
    utils::{Page, PageQuery},
};

use super::request::{CreateParticipantRequest, UpdateParticipantRequest};

/// Ranked participants of an event
pub async fn list_event_participants(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath(event_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<Participant>>> {
    let participants = ParticipantService::list_ranked(state.db(), &event_id, page).await?;
    Ok(ApiResponse::success(participants))
}

/// Participants assigned to one jury of an event
pub async fn list_jury_participants(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath((event_id, jury_id)): AppPath<(Uuid, Uuid)>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<Participant>>> {
    let participants =
        ParticipantService::list_for_jury(state.db(), &event_id, &jury_id, page).await?;
    Ok(ApiResponse::success(participants))
}

/// Register a participant on the event under the jury
pub async fn create_participant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, jury_id)): AppPath<(Uuid, Uuid)>,
    AppJson(mut payload): AppJson<CreateParticipantRequest>,
) -> AppResult<ApiResponse<Participant>> {
    authorization::require_staff_or_committee(&auth_user, "register participants")?;
    payload.normalize();
    payload.check()?;

    let participant =
        ParticipantService::register(state.db(), &event_id, &jury_id, payload.into()).await?;
    Ok(ApiResponse::created(participant))
}

pub async fn get_participant(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    AppPath((event_id, jury_id, id)): AppPath<(Uuid, Uuid, Uuid)>,
) -> AppResult<ApiResponse<Participant>> {
    let participant = ParticipantService::get(state.db(), &event_id, &jury_id, &id).await?;
    Ok(ApiResponse::success(participant))
}

/// Update a participant; who may write depends on the fields sent
pub async fn update_participant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, jury_id, id)): AppPath<(Uuid, Uuid, Uuid)>,
    AppJson(mut payload): AppJson<UpdateParticipantRequest>,
) -> AppResult<ApiResponse<Participant>> {
    payload.normalize();
    payload.check()?;

    let participant = ParticipantService::update(
        state.db(),
        &auth_user,
        &event_id,
        &jury_id,
        &id,
        payload.into(),
    )
    .await?;
    Ok(ApiResponse::success(participant))
}

pub async fn delete_participant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath((event_id, jury_id, id)): AppPath<(Uuid, Uuid, Uuid)>,
) -> AppResult<ApiResponse<()>> {
    authorization::require_staff_or_committee(&auth_user, "delete participants")?;

    ParticipantService::delete(state.db(), &event_id, &jury_id, &id).await?;
    Ok(ApiResponse::success(()).with_message("Participant deleted"))
}
