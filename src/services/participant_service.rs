//! Participant service
//!
//! Participants are registered under a jury of an event. Only that jury may
//! write their scores; staff and committee may edit the rest of the profile.

use jurybox_rules::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    authorization,
    db::repositories::{EventRepository, ParticipantRepository, RosterRepository},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{NewParticipant, Participant, ParticipantChanges, RosterKind, RosterSlot},
    services::roster_service::ensure_capacity,
    utils::{Page, PageQuery, validation::validate_score_field},
};

pub struct ParticipantService;

impl ParticipantService {
    /// Participants of an event ranked by total score, unscored last
    pub async fn list_ranked(
        pool: &PgPool,
        event_id: &Uuid,
        page: PageQuery,
    ) -> AppResult<Page<Participant>> {
        Self::require_event(pool, event_id).await?;

        let (participants, total) = futures::try_join!(
            ParticipantRepository::list_for_event(pool, event_id, page.limit(), page.offset()),
            EventRepository::count_roster(pool, event_id, RosterSlot::Participant),
        )?;

        Ok(Page::new(participants, total, page))
    }

    /// Participants of an event assigned to one jury
    pub async fn list_for_jury(
        pool: &PgPool,
        event_id: &Uuid,
        jury_id: &Uuid,
        page: PageQuery,
    ) -> AppResult<Page<Participant>> {
        Self::require_event_jury(pool, event_id, jury_id).await?;

        let (participants, total) = futures::try_join!(
            ParticipantRepository::list_for_jury(
                pool,
                event_id,
                jury_id,
                page.limit(),
                page.offset()
            ),
            ParticipantRepository::count_for_jury(pool, event_id, jury_id),
        )?;

        Ok(Page::new(participants, total, page))
    }

    /// Register a participant on the event and assign them to the jury
    pub async fn register(
        pool: &PgPool,
        event_id: &Uuid,
        jury_id: &Uuid,
        new_participant: NewParticipant,
    ) -> AppResult<Participant> {
        let mut tx = pool.begin().await?;

        let event = EventRepository::lock_by_id(&mut *tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if !RosterRepository::is_attached(&mut *tx, RosterKind::Jury, event_id, jury_id).await? {
            return Err(AppError::NotFound("Jury not found".to_string()));
        }

        let current =
            EventRepository::count_roster(&mut *tx, event_id, RosterSlot::Participant).await?;
        ensure_capacity(&event, RosterSlot::Participant, current)?;

        let participant = ParticipantRepository::create(&mut *tx, &new_participant)
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => AppError::AlreadyExists(format!(
                    "Participant code {} is already in use",
                    new_participant.code
                )),
                other => other,
            })?;
        ParticipantRepository::attach_to_event(&mut *tx, event_id, &participant.id).await?;
        ParticipantRepository::assign_to_jury(&mut *tx, jury_id, &participant.id).await?;

        tx.commit().await?;

        tracing::info!(
            event_id = %event_id,
            jury_id = %jury_id,
            participant_id = %participant.id,
            code = %participant.code,
            "Participant registered"
        );
        Ok(participant)
    }

    /// Participant of the event assigned to the jury
    pub async fn get(
        pool: &PgPool,
        event_id: &Uuid,
        jury_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Participant> {
        ParticipantRepository::find_for_jury(pool, event_id, jury_id, id)
            .await?
            .ok_or_else(Self::participant_not_found)
    }

    /// Update a participant.
    ///
    /// Score fields need the caller to be the jury in the path and to be
    /// assigned to the participant; profile fields need staff, committee or
    /// that same jury.
    pub async fn update(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        event_id: &Uuid,
        jury_id: &Uuid,
        id: &Uuid,
        changes: ParticipantChanges,
    ) -> AppResult<Participant> {
        ParticipantRepository::find_in_event(pool, event_id, id)
            .await?
            .ok_or_else(Self::participant_not_found)?;

        let in_jury = ParticipantRepository::is_assigned(pool, jury_id, id).await?;
        let assigned = in_jury && Self::caller_is_jury(pool, caller, jury_id).await?;

        if changes.touches_scores() {
            authorization::require_score_editor(caller, assigned)?;
        }
        if changes.touches_profile() || !changes.touches_scores() {
            authorization::require_participant_profile_editor(caller, assigned)?;
        }

        if !in_jury {
            return Err(Self::participant_not_found());
        }

        if let Some(score_field) = &changes.score_field {
            validate_score_field(score_field).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let participant =
            ParticipantRepository::update(pool, id, &changes.with_derived_total()).await?;

        tracing::info!(participant_id = %id, updated_by = %caller.id, "Participant updated");
        Ok(participant)
    }

    /// Delete a participant of the event assigned to the jury
    pub async fn delete(
        pool: &PgPool,
        event_id: &Uuid,
        jury_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<()> {
        Self::get(pool, event_id, jury_id, id).await?;
        ParticipantRepository::delete(pool, id).await?;

        tracing::info!(participant_id = %id, "Participant deleted");
        Ok(())
    }

    /// Whether the caller's own jury record is `jury_id`
    async fn caller_is_jury(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        jury_id: &Uuid,
    ) -> AppResult<bool> {
        if !caller.has_role(Role::Jury) {
            return Ok(false);
        }
        let record = RosterRepository::find_record_by_user(pool, RosterKind::Jury, &caller.id).await?;
        Ok(record.is_some_and(|r| r.id == *jury_id))
    }

    async fn require_event(pool: &PgPool, event_id: &Uuid) -> AppResult<()> {
        EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        Ok(())
    }

    async fn require_event_jury(pool: &PgPool, event_id: &Uuid, jury_id: &Uuid) -> AppResult<()> {
        Self::require_event(pool, event_id).await?;
        if !RosterRepository::is_attached(pool, RosterKind::Jury, event_id, jury_id).await? {
            return Err(AppError::NotFound("Jury not found".to_string()));
        }
        Ok(())
    }

    fn participant_not_found() -> AppError {
        AppError::NotFound("Participant not found".to_string())
    }
}
