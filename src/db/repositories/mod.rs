//! Database repositories
//!
//! Repositories handle all direct database interactions. Single-statement
//! functions accept any executor so services can run them on the pool or
//! inside a transaction.

pub mod event_repo;
pub mod participant_repo;
pub mod roster_repo;
pub mod token_repo;
pub mod user_repo;

pub use event_repo::EventRepository;
pub use participant_repo::ParticipantRepository;
pub use roster_repo::RosterRepository;
pub use token_repo::TokenRepository;
pub use user_repo::UserRepository;
