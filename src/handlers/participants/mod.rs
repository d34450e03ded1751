//! Participant handlers

mod handler;
pub mod request;

pub use request::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Participant routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/event/{eid}/participants", get(handler::list_event_participants))
        .route(
            "/event/{eid}/jury/{jid}/participants",
            get(handler::list_jury_participants).post(handler::create_participant),
        )
        .route(
            "/event/{eid}/jury/{jid}/participants/{id}",
            get(handler::get_participant)
                .put(handler::update_participant)
                .delete(handler::delete_participant),
        )
}
