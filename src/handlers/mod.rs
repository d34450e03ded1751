//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Everything except registration, login, token refresh and health checks
//! sits behind the bearer-token middleware.

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod participants;
pub mod rosters;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/auth", auth::routes())
        .merge(events::routes())
        .merge(rosters::committee_routes())
        .merge(rosters::jury_routes())
        .merge(participants::routes())
        .merge(admin::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::public_routes())
        .merge(protected)
}
