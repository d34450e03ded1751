//! Event repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Event, EventChanges, EventStatistics, NewEvent, RosterKind, RosterSlot},
};

/// Repository for event database operations
pub struct EventRepository;

fn roster_table(slot: RosterSlot) -> &'static str {
    match slot {
        RosterSlot::Committee => "event_committees",
        RosterSlot::Jury => "event_juries",
        RosterSlot::Participant => "event_participants",
    }
}

impl EventRepository {
    /// Create a new event
    pub async fn create<'e, E>(executor: E, new_event: &NewEvent) -> AppResult<Event>
    where
        E: PgExecutor<'e>,
    {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                author_id, title, start_date, end_date, start_time, end_time,
                max_participants, num_jury, num_committee, event_level
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_event.author_id)
        .bind(&new_event.title)
        .bind(new_event.start_date)
        .bind(new_event.end_date)
        .bind(new_event.start_time)
        .bind(new_event.end_time)
        .bind(new_event.max_participants)
        .bind(new_event.num_jury)
        .bind(new_event.num_committee)
        .bind(&new_event.event_level)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id<'e, E>(executor: E, id: &Uuid) -> AppResult<Option<Event>>
    where
        E: PgExecutor<'e>,
    {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(event)
    }

    /// Find event by ID and lock its row until the transaction ends.
    ///
    /// Roster adds serialize on this lock.
    pub async fn lock_by_id<'e, E>(executor: E, id: &Uuid) -> AppResult<Option<Event>>
    where
        E: PgExecutor<'e>,
    {
        let event =
            sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(event)
    }

    /// Update event
    pub async fn update<'e, E>(executor: E, id: &Uuid, changes: &EventChanges) -> AppResult<Event>
    where
        E: PgExecutor<'e>,
    {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                max_participants = COALESCE($7, max_participants),
                num_jury = COALESCE($8, num_jury),
                num_committee = COALESCE($9, num_committee),
                event_level = COALESCE($10, event_level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.start_time)
        .bind(changes.end_time)
        .bind(changes.max_participants)
        .bind(changes.num_jury)
        .bind(changes.num_committee)
        .bind(&changes.event_level)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    /// Delete event. Roster links go with it; role records and participants stay.
    pub async fn delete<'e, E>(executor: E, id: &Uuid) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(r#"DELETE FROM events WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List events with pagination
    pub async fn list<'e, E>(executor: E, limit: i64, offset: i64) -> AppResult<Vec<Event>>
    where
        E: PgExecutor<'e>,
    {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            ORDER BY start_date DESC, start_time DESC, created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(events)
    }

    /// Events a committee or jury member is attached to
    pub async fn list_for_member<'e, E>(
        executor: E,
        kind: RosterKind,
        member_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Event>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT e.* FROM events e
            JOIN {link} l ON l.event_id = e.id
            WHERE l.{column} = $1
            ORDER BY e.start_date DESC, e.start_time DESC, e.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(member_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await?;

        Ok(events)
    }

    pub async fn count_for_member<'e, E>(
        executor: E,
        kind: RosterKind,
        member_id: &Uuid,
    ) -> AppResult<i64>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT COUNT(*) FROM {link} WHERE {column} = $1",
            link = kind.link_table(),
            column = kind.link_column(),
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(member_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Number of members currently on one of the event's rosters
    pub async fn count_roster<'e, E>(executor: E, event_id: &Uuid, slot: RosterSlot) -> AppResult<i64>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE event_id = $1",
            roster_table(slot)
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(event_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Site-wide totals, queried concurrently
    pub async fn statistics(pool: &PgPool) -> AppResult<EventStatistics> {
        let (total_event, total_participants, total_jury, total_committee) = futures::try_join!(
            Self::count_table(pool, "events"),
            Self::count_table(pool, "participants"),
            Self::count_table(pool, "juries"),
            Self::count_table(pool, "committees"),
        )?;

        Ok(EventStatistics {
            total_event,
            total_participants,
            total_jury,
            total_committee,
        })
    }

    async fn count_table(pool: &PgPool, table: &'static str) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_tables() {
        assert_eq!(roster_table(RosterSlot::Committee), "event_committees");
        assert_eq!(roster_table(RosterSlot::Jury), "event_juries");
        assert_eq!(roster_table(RosterSlot::Participant), "event_participants");
    }
}
