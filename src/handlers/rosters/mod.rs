//! Committee and jury roster handlers
//!
//! Both rosters expose the same endpoints under `/event/{eid}/committee` and
//! `/event/{eid}/jury`. They differ only in who may list and add members.

mod handler;
pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Committee roster routes
pub fn committee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/event/{eid}/committee",
            get(handler::list_committees).post(handler::add_committee),
        )
        .route(
            "/event/{eid}/committee/{id}",
            get(handler::get_committee)
                .put(handler::update_committee)
                .delete(handler::delete_committee),
        )
}

/// Jury roster routes
pub fn jury_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/event/{eid}/jury",
            get(handler::list_juries).post(handler::add_jury),
        )
        .route(
            "/event/{eid}/jury/{jid}",
            get(handler::get_jury)
                .put(handler::update_jury)
                .delete(handler::delete_jury),
        )
}
