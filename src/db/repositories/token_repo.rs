//! Refresh token repository

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppResult, models::RefreshToken};

pub struct TokenRepository;

impl TokenRepository {
    pub async fn create<'e, E>(
        executor: E,
        user_id: &Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken>
    where
        E: PgExecutor<'e>,
    {
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(executor)
        .await?;

        Ok(token)
    }

    /// Remove a token by digest and return it, so a token can be used once
    pub async fn take_by_hash<'e, E>(executor: E, token_hash: &str) -> AppResult<Option<RefreshToken>>
    where
        E: PgExecutor<'e>,
    {
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"DELETE FROM refresh_tokens WHERE token_hash = $1 RETURNING *"#,
        )
        .bind(token_hash)
        .fetch_optional(executor)
        .await?;

        Ok(token)
    }

    /// Revoke every refresh token of a user
    pub async fn delete_for_user<'e, E>(executor: E, user_id: &Uuid) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(r#"DELETE FROM refresh_tokens WHERE user_id = $1"#)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_by_hash<'e, E>(executor: E, user_id: &Uuid, token_hash: &str) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let result =
            sqlx::query(r#"DELETE FROM refresh_tokens WHERE user_id = $1 AND token_hash = $2"#)
                .bind(user_id)
                .bind(token_hash)
                .execute(executor)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn purge_expired<'e, E>(executor: E) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(r#"DELETE FROM refresh_tokens WHERE expires_at <= NOW()"#)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
