//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod event_service;
pub mod participant_service;
pub mod roster_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use event_service::EventService;
pub use participant_service::ParticipantService;
pub use roster_service::RosterService;
