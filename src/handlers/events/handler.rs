//! Event handler implementations

use axum::{extract::State, http::Method};
use uuid::Uuid;
use validator::Validate;

use crate::{
    authorization,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthenticatedUser,
    models::{Event, RosterKind},
    response::ApiResponse,
    services::{EventService, event_service::EventListing},
    state::AppState,
    utils::{Page, PageQuery},
};

use super::request::{CreateEventRequest, UpdateEventRequest};

/// List all events with statistics
pub async fn list_events(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<EventListing>> {
    authorization::require_staff(&auth_user, "list events")?;

    let listing = EventService::list(state.db(), page).await?;
    Ok(ApiResponse::success(listing))
}

/// Create a new event
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(mut payload): AppJson<CreateEventRequest>,
) -> AppResult<ApiResponse<Event>> {
    authorization::require_staff(&auth_user, "create events")?;
    payload.normalize();
    payload.validate()?;

    let event = EventService::create(state.db(), payload.into_new_event(auth_user.id)).await?;
    Ok(ApiResponse::created(event))
}

/// Get a specific event
pub async fn get_event(
    State(state): State<AppState>,
    method: Method,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<ApiResponse<Event>> {
    authorization::require_staff_or_committee_or_read_only(&auth_user, &method, "view events")?;

    let event = EventService::get(state.db(), &id).await?;
    Ok(ApiResponse::success(event))
}

/// Update an event
pub async fn update_event(
    State(state): State<AppState>,
    method: Method,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(mut payload): AppJson<UpdateEventRequest>,
) -> AppResult<ApiResponse<Event>> {
    authorization::require_staff_or_committee_or_read_only(&auth_user, &method, "update events")?;
    payload.normalize();
    payload.validate()?;

    let event = EventService::update(state.db(), &id, payload.into()).await?;
    Ok(ApiResponse::success(event))
}

/// Delete an event
pub async fn delete_event(
    State(state): State<AppState>,
    method: Method,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<ApiResponse<()>> {
    authorization::require_staff_or_committee_or_read_only(&auth_user, &method, "delete events")?;

    EventService::delete(state.db(), &id).await?;
    Ok(ApiResponse::success(()).with_message("Event deleted"))
}

/// Events a committee member is attached to
pub async fn list_committee_events(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<Event>>> {
    authorization::require_committee_view(&auth_user)?;

    let events = EventService::list_for_member(state.db(), RosterKind::Committee, &id, page).await?;
    Ok(ApiResponse::success(events))
}

/// Events a jury member is attached to
pub async fn list_jury_events(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<ApiResponse<Page<Event>>> {
    authorization::require_jury_view(&auth_user)?;

    let events = EventService::list_for_member(state.db(), RosterKind::Jury, &id, page).await?;
    Ok(ApiResponse::success(events))
}
