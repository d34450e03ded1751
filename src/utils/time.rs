//! Time utilities

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Instant `days` from now
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    now_utc() + Duration::days(days)
}

pub fn combine_date_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Check that an event does not end before it starts.
///
/// An event may start and end at the same instant.
pub fn validate_event_window(
    start_date: NaiveDate,
    start_time: NaiveTime,
    end_date: NaiveDate,
    end_time: NaiveTime,
) -> Result<(), &'static str> {
    if end_date < start_date {
        return Err("End date must not be before start date");
    }
    if combine_date_time(end_date, end_time) < combine_date_time(start_date, start_time) {
        return Err("End time must not be before start time");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_accepts_same_day() {
        assert!(
            validate_event_window(date(2024, 5, 1), time(9, 0), date(2024, 5, 1), time(17, 0))
                .is_ok()
        );
        assert!(
            validate_event_window(date(2024, 5, 1), time(9, 0), date(2024, 5, 1), time(9, 0))
                .is_ok()
        );
    }

    #[test]
    fn test_window_rejects_end_before_start() {
        assert!(
            validate_event_window(date(2024, 5, 2), time(9, 0), date(2024, 5, 1), time(17, 0))
                .is_err()
        );
        assert!(
            validate_event_window(date(2024, 5, 1), time(17, 0), date(2024, 5, 1), time(9, 0))
                .is_err()
        );
    }

    #[test]
    fn test_window_later_day_earlier_clock() {
        assert!(
            validate_event_window(date(2024, 5, 1), time(17, 0), date(2024, 5, 2), time(9, 0))
                .is_ok()
        );
    }

    #[test]
    fn test_days_from_now_is_in_future() {
        assert!(days_from_now(7) > now_utc());
    }
}
