//! Roster response DTOs

use serde::Serialize;

/// Data of a Pending answer: the URL that repeats the request with confirmation
#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub yes: String,
}
