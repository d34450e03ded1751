//! JuryBox - Competition Event Backend
//!
//! This library provides the HTTP API for running competition events:
//! staff create events, committees manage the jury and participant rosters,
//! and each jury scores the participants assigned to it.
//!
//! # Features
//!
//! - Events with a schedule and capacity limits per roster
//! - Confirm-or-create roster registration for committees and juries
//! - Capacity checks serialized on the event row
//! - Jury-only score edits, ranked participant listings
//! - Role-based access control with JWT bearer tokens
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod app;
pub mod authorization;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use app::create_router;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
