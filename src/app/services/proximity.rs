use chrono::{Local, NaiveDate};

use crate::app::domain::ProximityBucket;

/// Due dates at most this many days ahead are `Soon`.
pub const SOON_WINDOW_DAYS: i64 = 3;

/// Source of "today". Read at the start of every scan, never cached.
pub trait Calendar {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A calendar pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCalendar(pub NaiveDate);

impl Calendar for FixedCalendar {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Whole calendar days from `today` to `due`; negative when already past.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

pub fn proximity(due: NaiveDate, today: NaiveDate) -> ProximityBucket {
    match days_until(due, today) {
        d if d < 0 => ProximityBucket::Overdue,
        0 => ProximityBucket::Today,
        d if d <= SOON_WINDOW_DAYS => ProximityBucket::Soon,
        _ => ProximityBucket::Future,
    }
}

/// Parse `YYYY-MM-DD`. `None` for impossible dates such as `2025-02-30`.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_boundaries() {
        let today = date(2025, 1, 3);
        assert_eq!(proximity(date(2025, 1, 1), today), ProximityBucket::Overdue);
        assert_eq!(proximity(date(2025, 1, 2), today), ProximityBucket::Overdue);
        assert_eq!(proximity(date(2025, 1, 3), today), ProximityBucket::Today);
        assert_eq!(proximity(date(2025, 1, 4), today), ProximityBucket::Soon);
        assert_eq!(proximity(date(2025, 1, 6), today), ProximityBucket::Soon);
        assert_eq!(proximity(date(2025, 1, 7), today), ProximityBucket::Future);
    }

    #[test]
    fn test_monotonic_step_function() {
        let today = date(2024, 2, 27);
        let mut last = ProximityBucket::Overdue;
        for offset in -30..60 {
            let due = today + chrono::Duration::days(offset);
            let bucket = proximity(due, today);
            assert!(bucket >= last, "bucket went backwards at offset {offset}");
            last = bucket;
        }
        assert_eq!(last, ProximityBucket::Future);
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let today = date(2024, 2, 28);
        assert_eq!(days_until(date(2024, 3, 1), today), 2);
        assert_eq!(proximity(date(2024, 3, 2), today), ProximityBucket::Soon);
        assert_eq!(proximity(date(2024, 3, 3), today), ProximityBucket::Future);
        assert_eq!(days_until(date(2023, 12, 31), date(2024, 1, 1)), -1);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-01-01"), Some(date(2025, 1, 1)));
        assert_eq!(parse_iso_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_iso_date("2025-02-29"), None);
        assert_eq!(parse_iso_date("2025-13-01"), None);
        assert_eq!(parse_iso_date("2025-00-10"), None);
        assert_eq!(parse_iso_date("not-a-date"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_fixed_calendar() {
        let cal = FixedCalendar(date(2030, 6, 1));
        assert_eq!(cal.today(), date(2030, 6, 1));
    }
}
