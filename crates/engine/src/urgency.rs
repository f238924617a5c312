//! Days-until-expiry and the urgency bands derived from it.
//!
//! Nothing here is cached: callers pass the current instant on every read so
//! the value follows the wall clock.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{EngineError, ResultEngine};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Date format used by forms and seed data.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole days from `now` until `expiry`, rounded up.
///
/// `expiry` is taken at midnight UTC, so a record expiring today at any time
/// after midnight yields `0`, and one that expired yesterday yields `-1`.
#[must_use]
pub fn days_remaining(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry = expiry.and_time(NaiveTime::MIN).and_utc();
    let millis = (expiry - now).num_milliseconds();
    let days = millis.div_euclid(DAY_MILLIS);
    if millis.rem_euclid(DAY_MILLIS) == 0 {
        days
    } else {
        days + 1
    }
}

/// Parse a `YYYY-MM-DD` date typed in a form or read from seed data.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("\"{trimmed}\" is not a YYYY-MM-DD date")))
}

/// Visual urgency of a date-bearing record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    Overdue,
    Critical,
    Warning,
    Normal,
}

impl Urgency {
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days < 0 {
            Self::Overdue
        } else if days <= 7 {
            Self::Critical
        } else if days <= 30 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Short badge text shown next to the expiry date (`Due in 5d`).
    #[must_use]
    pub fn badge(days: i64) -> String {
        if days < 0 {
            format!("Expired {}d", days.unsigned_abs())
        } else {
            format!("Due in {days}d")
        }
    }
}

/// Live hint shown under the expiry field while a form is being edited.
#[must_use]
pub fn expiry_hint(days: Option<i64>) -> String {
    match days {
        None => "Select a date".to_string(),
        Some(d) if d < 0 => format!("Expired {} day(s) ago", d.unsigned_abs()),
        Some(d) => format!("Due in {d} day(s)"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn five_days_is_critical() {
        let now = Utc.with_ymd_and_hms(2025, 11, 24, 0, 0, 0).unwrap();
        let days = days_remaining(date(2025, 11, 29), now);
        assert_eq!(days, 5);
        assert_eq!(Urgency::from_days(days), Urgency::Critical);
    }

    #[test]
    fn partial_days_round_up() {
        let now = Utc.with_ymd_and_hms(2025, 11, 24, 15, 30, 0).unwrap();
        assert_eq!(days_remaining(date(2025, 11, 29), now), 5);
        assert_eq!(days_remaining(date(2025, 11, 24), now), 0);
        assert_eq!(days_remaining(date(2025, 11, 23), now), 0);
        assert_eq!(days_remaining(date(2025, 11, 22), now), -1);
    }

    #[test]
    fn monotonically_non_increasing() {
        let expiry = date(2026, 1, 15);
        let mut now = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let mut last = days_remaining(expiry, now);
        for _ in 0..200 {
            now += Duration::hours(7);
            let current = days_remaining(expiry, now);
            assert!(current <= last);
            last = current;
        }
    }

    #[test]
    fn band_edges() {
        assert_eq!(Urgency::from_days(-1), Urgency::Overdue);
        assert_eq!(Urgency::from_days(0), Urgency::Critical);
        assert_eq!(Urgency::from_days(7), Urgency::Critical);
        assert_eq!(Urgency::from_days(8), Urgency::Warning);
        assert_eq!(Urgency::from_days(30), Urgency::Warning);
        assert_eq!(Urgency::from_days(31), Urgency::Normal);
    }

    #[test]
    fn badges_and_hints() {
        assert_eq!(Urgency::badge(-3), "Expired 3d");
        assert_eq!(Urgency::badge(12), "Due in 12d");
        assert_eq!(expiry_hint(None), "Select a date");
        assert_eq!(expiry_hint(Some(-2)), "Expired 2 day(s) ago");
        assert_eq!(expiry_hint(Some(0)), "Due in 0 day(s)");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(parse_date(" 2025-12-31 ").unwrap(), date(2025, 12, 31));
        assert!(parse_date("31/12/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }
}
