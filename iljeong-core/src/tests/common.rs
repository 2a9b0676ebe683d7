use crate::Config;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config() -> Config {
    Config {
        time_zone: chrono_tz::Asia::Seoul,
        editor: None,
        default_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
        default_duration_minutes: 60,
        date_format: "%Y-%m-%d (%a)".to_string(),
        synonyms: Vec::new(),
    }
}

/// Wednesday 2024-01-10 00:00, Seoul wall clock.
pub fn reference() -> NaiveDateTime {
    date(2024, 1, 10).and_time(time(0, 0))
}

/// `reference()` as an instant.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 9, 15, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A Seoul (+09:00) instant.
pub fn seoul(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}
