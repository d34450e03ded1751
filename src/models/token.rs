//! Refresh token model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored refresh token. Only the SHA-256 digest of the token is kept.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
