//! Utility functions

pub mod crypto;
pub mod pagination;
pub mod time;
pub mod validation;

pub use crypto::{generate_secure_token, hash_string};
pub use pagination::{Page, PageQuery};
pub use time::{combine_date_time, now_utc, validate_event_window};
pub use validation::{validate_password, validate_phone, validate_username};
