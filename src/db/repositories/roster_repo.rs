//! Committee and jury repository
//!
//! Both rosters share one schema shape, so every query is parameterised by
//! [`RosterKind`]. Table and column names come from the kind, never from input.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{RosterKind, RosterMember, RosterRecord},
};

pub struct RosterRepository;

const MEMBER_COLUMNS: &str = r#"
    r.id, r.user_id, u.username, u.email, u.first_name, u.last_name,
    u.phone_number, u.address, u.city, u.state, u.photo_url,
    r.created_at, r.updated_at
"#;

impl RosterRepository {
    /// Create the role record for a user
    pub async fn create_record<'e, E>(
        executor: E,
        kind: RosterKind,
        user_id: &Uuid,
    ) -> AppResult<RosterRecord>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("INSERT INTO {} (user_id) VALUES ($1) RETURNING *", kind.table());

        let record = sqlx::query_as::<_, RosterRecord>(&sql)
            .bind(user_id)
            .fetch_one(executor)
            .await?;

        Ok(record)
    }

    pub async fn find_record_by_user<'e, E>(
        executor: E,
        kind: RosterKind,
        user_id: &Uuid,
    ) -> AppResult<Option<RosterRecord>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT * FROM {} WHERE user_id = $1", kind.table());

        let record = sqlx::query_as::<_, RosterRecord>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(record)
    }

    /// Find a member that is attached to the given event
    pub async fn find_in_event<'e, E>(
        executor: E,
        kind: RosterKind,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<RosterMember>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {columns}
            FROM {table} r
            JOIN users u ON u.id = r.user_id
            JOIN {link} l ON l.{column} = r.id
            WHERE l.event_id = $1 AND r.id = $2
            "#,
            columns = MEMBER_COLUMNS,
            table = kind.table(),
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let member = sqlx::query_as::<_, RosterMember>(&sql)
            .bind(event_id)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(member)
    }

    /// Members of an event's roster, oldest link first
    pub async fn list_for_event<'e, E>(
        executor: E,
        kind: RosterKind,
        event_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<RosterMember>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {columns}
            FROM {table} r
            JOIN users u ON u.id = r.user_id
            JOIN {link} l ON l.{column} = r.id
            WHERE l.event_id = $1
            ORDER BY l.created_at, u.username
            LIMIT $2 OFFSET $3
            "#,
            columns = MEMBER_COLUMNS,
            table = kind.table(),
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let members = sqlx::query_as::<_, RosterMember>(&sql)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await?;

        Ok(members)
    }

    /// Link a member to an event. Returns `false` when it was already linked.
    pub async fn attach<'e, E>(
        executor: E,
        kind: RosterKind,
        event_id: &Uuid,
        member_id: &Uuid,
    ) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "INSERT INTO {link} (event_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let result = sqlx::query(&sql)
            .bind(event_id)
            .bind(member_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn is_attached<'e, E>(
        executor: E,
        kind: RosterKind,
        event_id: &Uuid,
        member_id: &Uuid,
    ) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {link} WHERE event_id = $1 AND {column} = $2)",
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let exists: bool = sqlx::query_scalar(&sql)
            .bind(event_id)
            .bind(member_id)
            .fetch_one(executor)
            .await?;

        Ok(exists)
    }

    /// Unlink a member from one event. The role record stays.
    pub async fn detach<'e, E>(
        executor: E,
        kind: RosterKind,
        event_id: &Uuid,
        member_id: &Uuid,
    ) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "DELETE FROM {link} WHERE event_id = $1 AND {column} = $2",
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let result = sqlx::query(&sql)
            .bind(event_id)
            .bind(member_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn touch<'e, E>(executor: E, kind: RosterKind, id: &Uuid) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("UPDATE {} SET updated_at = NOW() WHERE id = $1", kind.table());

        sqlx::query(&sql).bind(id).execute(executor).await?;

        Ok(())
    }
}
