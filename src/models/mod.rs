//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod event;
pub mod participant;
pub mod roster;
pub mod token;
pub mod user;

pub use event::*;
pub use participant::*;
pub use roster::*;
pub use token::*;
pub use user::*;
