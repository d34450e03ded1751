//! User repository

use jurybox_rules::{Role, RoleSet};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewUser, User, UserProfileChanges},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E>(executor: E, new_user: &NewUser) -> AppResult<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, email, password_hash, first_name, last_name, roles,
                phone_number, address, city, state, photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.roles.to_strings())
        .bind(&new_user.phone_number)
        .bind(&new_user.address)
        .bind(&new_user.city)
        .bind(&new_user.state)
        .bind(&new_user.photo_url)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: &Uuid) -> AppResult<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username<'e, E>(executor: E, username: &str) -> AppResult<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find user by username or email (for login)
    pub async fn find_by_identifier<'e, E>(
        executor: E,
        identifier: &str,
    ) -> AppResult<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE username = $1 OR (email <> '' AND email = $1)
            ORDER BY username = $1 DESC
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Update profile fields
    pub async fn update_profile<'e, E>(
        executor: E,
        id: &Uuid,
        changes: &UserProfileChanges,
    ) -> AppResult<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone_number = COALESCE($5, phone_number),
                address = COALESCE($6, address),
                city = COALESCE($7, city),
                state = COALESCE($8, state),
                photo_url = COALESCE($9, photo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.phone_number)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.photo_url)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Replace the role set
    pub async fn set_roles<'e, E>(executor: E, id: &Uuid, roles: RoleSet) -> AppResult<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET roles = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(roles.to_strings())
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Add a role if the user does not hold it yet
    pub async fn grant_role<'e, E>(executor: E, id: &Uuid, role: Role) -> AppResult<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                roles = CASE WHEN $2 = ANY(roles) THEN roles ELSE array_append(roles, $2) END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Update last login timestamp
    pub async fn update_last_login<'e, E>(executor: E, id: &Uuid) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(r#"UPDATE users SET last_login_at = NOW() WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// List users with pagination, optionally filtered by role
    pub async fn list<'e, E>(
        executor: E,
        role: Option<Role>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<User>>
    where
        E: PgExecutor<'e>,
    {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::TEXT IS NULL OR $1 = ANY(roles))
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(role.map(Role::as_str))
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    pub async fn count<'e, E>(executor: E, role: Option<Role>) -> AppResult<i64>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM users WHERE ($1::TEXT IS NULL OR $1 = ANY(roles))"#,
        )
        .bind(role.map(Role::as_str))
        .fetch_one(executor)
        .await?;

        Ok(count)
    }
}
