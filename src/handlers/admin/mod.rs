//! Staff-only user administration

mod handler;
pub mod request;

pub use request::*;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handler::list_users))
        .route("/admin/users/{id}/roles", put(handler::update_user_roles))
}
