//! Committee and jury roster service
//!
//! Adding someone to an event roster follows a confirm-or-create flow keyed on
//! the username:
//!
//! - unknown username: create the user with the roster's role, create the role
//!   record and link it to the event;
//! - known username without `confirm=1`: answer `Pending` with a hint URL and
//!   change nothing;
//! - known username with `confirm=1`: link the user's existing role record.
//!
//! Every mutation locks the event row first, so capacity checks and inserts
//! from concurrent requests serialize.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{EventRepository, RosterRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Event, RosterKind, RosterMember, RosterSlot, User, UserProfileChanges},
    services::auth_service::Registration,
    utils::{Page, PageQuery},
};

/// What a roster add will do, given what already exists
#[derive(Debug)]
pub enum RosterAction {
    Create,
    Pending,
    AttachExisting(User),
}

/// Decide the roster action from the user holding the username, if any, and
/// whether the request was confirmed.
pub fn decide(existing: Option<User>, confirmed: bool) -> RosterAction {
    match (existing, confirmed) {
        (None, _) => RosterAction::Create,
        (Some(_), false) => RosterAction::Pending,
        (Some(user), true) => RosterAction::AttachExisting(user),
    }
}

/// Fail when the roster is already at the event's configured maximum
pub fn ensure_capacity(event: &Event, slot: RosterSlot, current: i64) -> AppResult<()> {
    if event.has_room(slot, current) {
        Ok(())
    } else {
        Err(AppError::CapacityExceeded(format!(
            "Event already has the maximum of {} {} member(s)",
            event.limit(slot),
            slot.label()
        )))
    }
}

/// Short form returned when an existing member is attached
#[derive(Debug, Clone, Serialize)]
pub struct RosterMemberSummary {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub enum RosterAddOutcome {
    Created(RosterMember),
    Pending { hint: String },
    Attached(RosterMemberSummary),
}

pub struct RosterService;

impl RosterService {
    /// Members of an event's roster
    pub async fn list(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        page: PageQuery,
    ) -> AppResult<Page<RosterMember>> {
        Self::require_event(pool, event_id).await?;

        let (members, total) = futures::try_join!(
            RosterRepository::list_for_event(pool, kind, event_id, page.limit(), page.offset()),
            EventRepository::count_roster(pool, event_id, kind.slot()),
        )?;

        Ok(Page::new(members, total, page))
    }

    /// Add a member to an event roster.
    ///
    /// `registration` runs only when `username` is free and an account has to
    /// be created, so pending and confirmed adds never validate a password.
    pub async fn add<F>(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        username: &str,
        confirmed: bool,
        registration: F,
    ) -> AppResult<RosterAddOutcome>
    where
        F: FnOnce() -> AppResult<Registration>,
    {
        Self::require_event(pool, event_id).await?;

        let existing = UserRepository::find_by_username(pool, username).await?;

        match decide(existing, confirmed) {
            RosterAction::Create => Self::create(pool, kind, event_id, registration()?)
                .await
                .map(RosterAddOutcome::Created),
            RosterAction::Pending => {
                tracing::info!(
                    event_id = %event_id,
                    roster = kind.path_segment(),
                    username = %username,
                    "Existing user needs confirmation"
                );
                Ok(RosterAddOutcome::Pending {
                    hint: kind.confirm_hint(*event_id),
                })
            }
            RosterAction::AttachExisting(user) => {
                Self::attach_existing(pool, kind, event_id, &user)
                    .await
                    .map(RosterAddOutcome::Attached)
            }
        }
    }

    async fn create(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        registration: Registration,
    ) -> AppResult<RosterMember> {
        let new_user = registration.into_new_user(kind.role().into())?;

        let mut tx = pool.begin().await?;

        let event = Self::lock_event(&mut tx, event_id).await?;
        let current = EventRepository::count_roster(&mut *tx, event_id, kind.slot()).await?;
        ensure_capacity(&event, kind.slot(), current)?;

        let user = UserRepository::create(&mut *tx, &new_user).await?;
        let record = RosterRepository::create_record(&mut *tx, kind, &user.id).await?;
        RosterRepository::attach(&mut *tx, kind, event_id, &record.id).await?;

        tx.commit().await?;

        tracing::info!(
            event_id = %event_id,
            roster = kind.path_segment(),
            member_id = %record.id,
            username = %user.username,
            "Roster member created"
        );

        Ok(RosterMember::from_parts(&user, &record))
    }

    async fn attach_existing(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        user: &User,
    ) -> AppResult<RosterMemberSummary> {
        let mut tx = pool.begin().await?;

        let event = Self::lock_event(&mut tx, event_id).await?;

        let record = RosterRepository::find_record_by_user(&mut *tx, kind, &user.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} record not found for {}", kind.label(), user.username))
            })?;

        if !RosterRepository::is_attached(&mut *tx, kind, event_id, &record.id).await? {
            let current = EventRepository::count_roster(&mut *tx, event_id, kind.slot()).await?;
            ensure_capacity(&event, kind.slot(), current)?;
            RosterRepository::attach(&mut *tx, kind, event_id, &record.id).await?;

            tracing::info!(
                event_id = %event_id,
                roster = kind.path_segment(),
                member_id = %record.id,
                "Existing roster member attached"
            );
        }

        tx.commit().await?;

        Ok(RosterMemberSummary {
            id: record.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    /// Member of an event roster
    pub async fn get(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<RosterMember> {
        RosterRepository::find_in_event(pool, kind, event_id, id)
            .await?
            .ok_or_else(|| Self::member_not_found(kind))
    }

    /// Edit the profile of the member's user account
    pub async fn update(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        id: &Uuid,
        changes: UserProfileChanges,
    ) -> AppResult<RosterMember> {
        let mut tx = pool.begin().await?;

        let member = RosterRepository::find_in_event(&mut *tx, kind, event_id, id)
            .await?
            .ok_or_else(|| Self::member_not_found(kind))?;

        UserRepository::update_profile(&mut *tx, &member.user_id, &changes).await?;
        RosterRepository::touch(&mut *tx, kind, id).await?;

        let member = RosterRepository::find_in_event(&mut *tx, kind, event_id, id)
            .await?
            .ok_or_else(|| Self::member_not_found(kind))?;

        tx.commit().await?;
        Ok(member)
    }

    /// Remove a member from this event's roster. The role record, its links to
    /// other events and the user's role stay, so a confirmed add can link the
    /// same record again.
    pub async fn delete(
        pool: &PgPool,
        kind: RosterKind,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        Self::lock_event(&mut tx, event_id).await?;
        if !RosterRepository::detach(&mut *tx, kind, event_id, id).await? {
            return Err(Self::member_not_found(kind));
        }

        tx.commit().await?;

        tracing::info!(
            event_id = %event_id,
            roster = kind.path_segment(),
            member_id = %id,
            "Roster member removed from event"
        );
        Ok(())
    }

    async fn require_event(pool: &PgPool, event_id: &Uuid) -> AppResult<Event> {
        EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    async fn lock_event(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: &Uuid,
    ) -> AppResult<Event> {
        EventRepository::lock_by_id(&mut **tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    fn member_not_found(kind: RosterKind) -> AppError {
        AppError::NotFound(format!("{} not found", kind.label()))
    }
}
