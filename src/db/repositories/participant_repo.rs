//! Participant repository

use serde_json::Value;
use sqlx::{PgExecutor, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewParticipant, Participant, ParticipantChanges},
};

/// Repository for participant database operations
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Create a participant with empty scores
    pub async fn create<'e, E>(executor: E, new_participant: &NewParticipant) -> AppResult<Participant>
    where
        E: PgExecutor<'e>,
    {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (code, full_name, age, email, institute, photo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new_participant.code)
        .bind(&new_participant.full_name)
        .bind(new_participant.age)
        .bind(&new_participant.email)
        .bind(&new_participant.institute)
        .bind(&new_participant.photo_url)
        .fetch_one(executor)
        .await?;

        Ok(participant)
    }

    /// Find a participant that belongs to the event
    pub async fn find_in_event<'e, E>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<Participant>>
    where
        E: PgExecutor<'e>,
    {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.* FROM participants p
            JOIN event_participants ep ON ep.participant_id = p.id
            WHERE ep.event_id = $1 AND p.id = $2
            "#,
        )
        .bind(event_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(participant)
    }

    /// Find a participant that belongs to the event and is assigned to the jury
    pub async fn find_for_jury<'e, E>(
        executor: E,
        event_id: &Uuid,
        jury_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<Participant>>
    where
        E: PgExecutor<'e>,
    {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.* FROM participants p
            JOIN event_participants ep ON ep.participant_id = p.id
            JOIN jury_participants jp ON jp.participant_id = p.id
            WHERE ep.event_id = $1 AND jp.jury_id = $2 AND p.id = $3
            "#,
        )
        .bind(event_id)
        .bind(jury_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(participant)
    }

    /// Whether the participant is assigned to the jury
    pub async fn is_assigned<'e, E>(executor: E, jury_id: &Uuid, id: &Uuid) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM jury_participants WHERE jury_id = $1 AND participant_id = $2
            )
            "#,
        )
        .bind(jury_id)
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    /// Participants of an event, best score first
    pub async fn list_for_event<'e, E>(
        executor: E,
        event_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Participant>>
    where
        E: PgExecutor<'e>,
    {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.* FROM participants p
            JOIN event_participants ep ON ep.participant_id = p.id
            WHERE ep.event_id = $1
            ORDER BY p.total_score DESC NULLS LAST, p.code
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(event_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(participants)
    }

    /// Participants of an event assigned to one jury
    pub async fn list_for_jury<'e, E>(
        executor: E,
        event_id: &Uuid,
        jury_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Participant>>
    where
        E: PgExecutor<'e>,
    {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.* FROM participants p
            JOIN event_participants ep ON ep.participant_id = p.id
            JOIN jury_participants jp ON jp.participant_id = p.id
            WHERE ep.event_id = $1 AND jp.jury_id = $2
            ORDER BY p.code
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(event_id)
        .bind(jury_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(participants)
    }

    pub async fn count_for_jury<'e, E>(executor: E, event_id: &Uuid, jury_id: &Uuid) -> AppResult<i64>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM event_participants ep
            JOIN jury_participants jp ON jp.participant_id = ep.participant_id
            WHERE ep.event_id = $1 AND jp.jury_id = $2
            "#,
        )
        .bind(event_id)
        .bind(jury_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    pub async fn attach_to_event<'e, E>(executor: E, event_id: &Uuid, id: &Uuid) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO event_participants (event_id, participant_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn assign_to_jury<'e, E>(executor: E, jury_id: &Uuid, id: &Uuid) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO jury_participants (jury_id, participant_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(jury_id)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Update participant
    pub async fn update<'e, E>(
        executor: E,
        id: &Uuid,
        changes: &ParticipantChanges,
    ) -> AppResult<Participant>
    where
        E: PgExecutor<'e>,
    {
        let score_field: Option<Json<&Value>> = changes.score_field.as_ref().map(Json);

        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET
                code = COALESCE($2, code),
                full_name = COALESCE($3, full_name),
                age = COALESCE($4, age),
                email = COALESCE($5, email),
                institute = COALESCE($6, institute),
                photo_url = COALESCE($7, photo_url),
                total_score = COALESCE($8, total_score),
                score_field = COALESCE($9, score_field),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.code)
        .bind(&changes.full_name)
        .bind(changes.age)
        .bind(&changes.email)
        .bind(&changes.institute)
        .bind(&changes.photo_url)
        .bind(changes.total_score)
        .bind(score_field)
        .fetch_one(executor)
        .await?;

        Ok(participant)
    }

    /// Delete participant
    pub async fn delete<'e, E>(executor: E, id: &Uuid) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(r#"DELETE FROM participants WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
