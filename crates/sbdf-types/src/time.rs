//! Millisecond time bases for the SBDF date/time types.
//!
//! `DateTime`, `Date`, and `Time` values are stored on disk as signed 64-bit
//! millisecond counts since 0001-01-01T00:00:00; `TimeSpan` is a plain signed
//! millisecond count.

// Allow expect() for chrono construction with known-valid constant dates
// (the SBDF epoch 0001-01-01 is always in range).
#![allow(clippy::expect_used)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::TypeError;
use crate::value_type::ValueType;

/// Milliseconds per day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// The SBDF epoch, 0001-01-01T00:00:00.
#[must_use]
pub fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Milliseconds from the SBDF epoch to `dt`.
#[must_use]
pub fn datetime_to_millis(dt: &NaiveDateTime) -> i64 {
    dt.signed_duration_since(epoch()).num_milliseconds()
}

/// Milliseconds from the SBDF epoch to midnight of `date`.
#[must_use]
pub fn date_to_millis(date: &NaiveDate) -> i64 {
    date.signed_duration_since(epoch().date()).num_days() * MILLIS_PER_DAY
}

/// Milliseconds from midnight to `time`, sub-millisecond precision truncated.
#[must_use]
pub fn time_to_millis(time: &NaiveTime) -> i64 {
    time.signed_duration_since(epoch().time()).num_milliseconds()
}

/// Reconstruct a timestamp from its on-disk millisecond count.
pub fn datetime_from_millis(millis: i64) -> Result<NaiveDateTime, TypeError> {
    epoch()
        .checked_add_signed(TimeDelta::milliseconds(millis))
        .ok_or_else(|| TypeError::out_of_range(millis, ValueType::DateTime))
}

/// Reconstruct a date from its on-disk millisecond count.
///
/// Sub-day milliseconds are truncated, matching readers that convert through
/// a full timestamp.
pub fn date_from_millis(millis: i64) -> Result<NaiveDate, TypeError> {
    datetime_from_millis(millis).map(|dt| dt.date())
}

/// Reconstruct a time of day from its on-disk millisecond count.
///
/// Counts outside a single day wrap through the date, matching readers that
/// convert through a full timestamp.
pub fn time_from_millis(millis: i64) -> Result<NaiveTime, TypeError> {
    let in_day = millis.rem_euclid(MILLIS_PER_DAY);
    let secs = (in_day / 1000) as u32;
    let nanos = ((in_day % 1000) * 1_000_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or_else(|| TypeError::out_of_range(millis, ValueType::Time))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(datetime_to_millis(&epoch()), 0);
        assert_eq!(date_to_millis(&epoch().date()), 0);
        assert_eq!(time_to_millis(&epoch().time()), 0);
    }

    #[test]
    fn test_datetime_roundtrip() {
        let dt = NaiveDate::from_ymd_opt(1583, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let millis = datetime_to_millis(&dt);
        assert_eq!(datetime_from_millis(millis).unwrap(), dt);
    }

    #[test]
    fn test_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(1583, 1, 2).unwrap();
        let millis = date_to_millis(&date);
        assert_eq!(millis % MILLIS_PER_DAY, 0);
        assert_eq!(date_from_millis(millis).unwrap(), date);
    }

    #[test]
    fn test_time_roundtrip() {
        let time = NaiveTime::from_hms_opt(0, 22, 20).unwrap();
        let millis = time_to_millis(&time);
        assert_eq!(millis, (22 * 60 + 20) * 1000);
        assert_eq!(time_from_millis(millis).unwrap(), time);
    }

    #[test]
    fn test_time_wraps_past_midnight() {
        let millis = MILLIS_PER_DAY + 3_600_000;
        assert_eq!(
            time_from_millis(millis).unwrap(),
            NaiveTime::from_hms_opt(1, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_datetime_overflow_errors() {
        assert!(datetime_from_millis(i64::MAX).is_err());
    }
}
