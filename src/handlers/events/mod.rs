//! Event handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/event", get(handler::list_events).post(handler::create_event))
        .route(
            "/event/{eid}",
            get(handler::get_event)
                .put(handler::update_event)
                .delete(handler::delete_event),
        )
        .route("/event/committee/{id}", get(handler::list_committee_events))
        .route("/event/jury/{id}", get(handler::list_jury_events))
}
