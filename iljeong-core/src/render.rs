//! Pure Markdown rendering helpers.
//!
//! Draft block:
//!   ## 치과
//!
//!   - 날짜: 2024-01-11 (목)
//!   - 시간: 15:00 - 16:00 (1시간)
//!   - 장소: 강남역

use chrono::{DateTime, Datelike, Duration, FixedOffset, Weekday};
use std::fmt::Write;

use crate::draft::EventDraft;

/// Render a draft as a Markdown block. `date_format` may use `%a`, which is
/// replaced by the Korean weekday (목).
pub fn format_draft_block(draft: &EventDraft, date_format: &str) -> String {
    let date = format_date(draft.start, date_format);
    let start = draft.start.format("%H:%M");
    let end = if draft.end.date_naive() == draft.start.date_naive() {
        draft.end.format("%H:%M").to_string()
    } else {
        format!("{} {}", format_date(draft.end, date_format), draft.end.format("%H:%M"))
    };
    let duration = format_duration(draft.duration());

    let mut md = format!(
        "## {}\n\n- 날짜: {date}\n- 시간: {start} - {end} ({duration})\n",
        draft.title
    );
    if let Some(location) = &draft.location {
        md.push_str(&format!("- 장소: {location}\n"));
    }
    md
}

/// Formats a date with the user's format, weekday in Korean. A format chrono
/// can't render falls back to `%Y-%m-%d`.
pub fn format_date(date: DateTime<FixedOffset>, date_format: &str) -> String {
    let date_format = date_format.replace("%a", korean_weekday(date.weekday()));
    let mut out = String::new();
    if write!(out, "{}", date.format(&date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// `90 minutes` → `1시간 30분`.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{m}분"),
        (h, 0) => format!("{h}시간"),
        (h, m) => format!("{h}시간 {m}분"),
    }
}

fn korean_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}
