//! Event service

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::EventRepository,
    error::{AppError, AppResult},
    models::{Event, EventChanges, EventStatistics, NewEvent, RosterKind},
    utils::{Page, PageQuery, time::validate_event_window},
};

/// Event list together with site-wide totals
#[derive(Debug, Serialize)]
pub struct EventListing {
    pub statistic: EventStatistics,
    pub list_event: Page<Event>,
}

/// Event service
pub struct EventService;

impl EventService {
    /// List events with statistics
    pub async fn list(pool: &PgPool, page: PageQuery) -> AppResult<EventListing> {
        let (events, statistic) = futures::try_join!(
            EventRepository::list(pool, page.limit(), page.offset()),
            EventRepository::statistics(pool),
        )?;

        Ok(EventListing {
            list_event: Page::new(events, statistic.total_event, page),
            statistic,
        })
    }

    /// Events a committee or jury member is attached to
    pub async fn list_for_member(
        pool: &PgPool,
        kind: RosterKind,
        member_id: &Uuid,
        page: PageQuery,
    ) -> AppResult<Page<Event>> {
        let (events, total) = futures::try_join!(
            EventRepository::list_for_member(pool, kind, member_id, page.limit(), page.offset()),
            EventRepository::count_for_member(pool, kind, member_id),
        )?;

        Ok(Page::new(events, total, page))
    }

    /// Create a new event
    pub async fn create(pool: &PgPool, new_event: NewEvent) -> AppResult<Event> {
        Self::validate(
            new_event.start_date,
            new_event.start_time,
            new_event.end_date,
            new_event.end_time,
            [
                new_event.max_participants,
                new_event.num_jury,
                new_event.num_committee,
            ],
        )?;

        let event = EventRepository::create(pool, &new_event).await?;

        tracing::info!(event_id = %event.id, title = %event.title, author_id = %event.author_id, "Event created");
        Ok(event)
    }

    /// Get a specific event
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Event> {
        EventRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// Update an event. The merged result must still be a valid event.
    pub async fn update(pool: &PgPool, id: &Uuid, changes: EventChanges) -> AppResult<Event> {
        let mut tx = pool.begin().await?;

        let current = EventRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let merged = changes.apply_to(&current);
        Self::validate(
            merged.start_date,
            merged.start_time,
            merged.end_date,
            merged.end_time,
            [merged.max_participants, merged.num_jury, merged.num_committee],
        )?;

        let event = EventRepository::update(&mut *tx, id, &changes).await?;
        tx.commit().await?;

        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    /// Delete an event
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !EventRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    fn validate(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        capacities: [i32; 3],
    ) -> AppResult<()> {
        validate_event_window(start_date, start_time, end_date, end_time)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if capacities.iter().any(|c| *c < 0) {
            return Err(AppError::Validation(
                "Capacities must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    fn t(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_accepts_valid_event() {
        assert!(EventService::validate(d(1), t(8), d(1), t(17), [10, 2, 1]).is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed_window() {
        let err = EventService::validate(d(2), t(8), d(1), t(17), [10, 2, 1]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_negative_capacity() {
        let err = EventService::validate(d(1), t(8), d(1), t(17), [10, -1, 1]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    mod database {
        use super::*;
        use crate::{
            services::{ParticipantService, roster_service::RosterAddOutcome},
            test_utils::{database::fresh_pool, seed},
        };

        async fn jury_on(pool: &PgPool, event_id: &Uuid, username: &str, confirmed: bool) -> Uuid {
            match seed::add_member(pool, RosterKind::Jury, event_id, username, confirmed)
                .await
                .unwrap()
            {
                RosterAddOutcome::Created(member) => member.id,
                RosterAddOutcome::Attached(summary) => summary.id,
                other => panic!("expected a jury, got {other:?}"),
            }
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_list_reports_site_totals() {
            let pool = fresh_pool().await;
            let first = seed::event(&pool, 10, 2, 2).await;
            let second = seed::event(&pool, 10, 2, 2).await;

            let jury = jury_on(&pool, &first.id, "judge", false).await;
            // Linking the same record twice still counts one jury
            jury_on(&pool, &second.id, "judge", true).await;
            seed::add_member(&pool, RosterKind::Committee, &first.id, "clerk", false)
                .await
                .unwrap();
            ParticipantService::register(&pool, &first.id, &jury, seed::participant("P-1"))
                .await
                .unwrap();

            let page = PageQuery {
                page: Some(1),
                per_page: Some(1),
            };
            let listing = EventService::list(&pool, page).await.unwrap();

            assert_eq!(listing.statistic.total_event, 2);
            assert_eq!(listing.statistic.total_jury, 1);
            assert_eq!(listing.statistic.total_committee, 1);
            assert_eq!(listing.statistic.total_participants, 1);
            assert_eq!(listing.list_event.total, 2);
            assert_eq!(listing.list_event.items.len(), 1);
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_list_for_member_returns_linked_events() {
            let pool = fresh_pool().await;
            let first = seed::event(&pool, 10, 2, 2).await;
            let second = seed::event(&pool, 10, 2, 2).await;
            let unrelated = seed::event(&pool, 10, 2, 2).await;

            let jury = jury_on(&pool, &first.id, "judge", false).await;
            jury_on(&pool, &second.id, "judge", true).await;
            jury_on(&pool, &unrelated.id, "other_judge", false).await;

            let events =
                EventService::list_for_member(&pool, RosterKind::Jury, &jury, PageQuery::default())
                    .await
                    .unwrap();
            assert_eq!(events.total, 2);

            let mut ids: Vec<_> = events.items.iter().map(|e| e.id).collect();
            ids.sort();
            let mut expected = vec![first.id, second.id];
            expected.sort();
            assert_eq!(ids, expected);

            // A jury id is not a committee id
            let none =
                EventService::list_for_member(&pool, RosterKind::Committee, &jury, PageQuery::default())
                    .await
                    .unwrap();
            assert_eq!(none.total, 0);
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_missing_event_is_not_found() {
            let pool = fresh_pool().await;
            let missing = Uuid::new_v4();

            let err = EventService::update(&pool, &missing, EventChanges::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));

            let err = EventService::delete(&pool, &missing).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_deleted_event_is_gone() {
            let pool = fresh_pool().await;
            let event = seed::event(&pool, 10, 2, 2).await;

            EventService::delete(&pool, &event.id).await.unwrap();

            let err = EventService::get(&pool, &event.id).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
            let err = EventService::delete(&pool, &event.id).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
    }
}
