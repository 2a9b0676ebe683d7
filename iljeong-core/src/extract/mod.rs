//! Korean sentence → [`EventDraft`].
//!
//! Extraction is a fixed sequence of passes over a [`ParseState`] owned by
//! the call: location, date, time of day, duration, then title. Each pass
//! matches against the current residue and consumes what it used, so the
//! title is built only from words no pass claimed. Order matters: the date
//! must be settled before relative time offsets are added to it, and
//! keyword-qualified hours ("오후 3시") are tried before bare ones ("3시").

mod date;
mod duration;
mod location;
mod parse_state;
mod time;
mod title;

pub use date::{DateSignal, WeekModifier};
pub use parse_state::ParseState;
pub use time::{Period, TimeSignal, to_24_hour};

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::{draft::EventDraft, error::ParseFailure, keywords::Keywords};

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Seoul;
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Time used when the sentence names a date but no time.
pub fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("valid time")
}

/// Configuration options for [`extract_draft`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ExtractOptions<'a> {
    /// The instant relative expressions ("내일", "3시간 뒤") are resolved against.
    pub reference_instant: Option<DateTime<Utc>>,
    /// Zone whose wall clock the sentence speaks in.
    pub time_zone: Option<Tz>,
    pub default_time: Option<NaiveTime>,
    pub default_duration_minutes: Option<u32>,
    /// Synonyms rewritten to canonical keywords before extraction.
    pub keywords: Option<&'a Keywords>,
}

/// Extracts an event draft from a free-form Korean sentence.
///
/// Fails only when the sentence carries neither a date nor a time. Anything
/// else missing falls back to a default: the reference day, 09:00, 60
/// minutes, no location, the `새 일정` title.
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use iljeong_core::extract::{extract_draft, ExtractOptions};
/// let opts = ExtractOptions {
///     // 2024-01-10 00:00 in Seoul, a Wednesday
///     reference_instant: Some(Utc.with_ymd_and_hms(2024, 1, 9, 15, 0, 0).unwrap()),
///     ..Default::default()
/// };
///
/// let draft = extract_draft("내일 오후 3시 치과", Some(opts)).unwrap();
///
/// assert_eq!(draft.title, "치과");
/// assert_eq!(draft.start.to_rfc3339(), "2024-01-11T15:00:00+09:00");
/// assert_eq!(draft.end.to_rfc3339(), "2024-01-11T16:00:00+09:00");
/// assert!(draft.location.is_none());
/// ```
pub fn extract_draft(
    input: &str,
    options: Option<ExtractOptions>,
) -> Result<EventDraft, ParseFailure> {
    let options = options.unwrap_or_default();
    let reference = options.reference_instant.unwrap_or_else(Utc::now);
    let tz = options.time_zone.unwrap_or(DEFAULT_TIME_ZONE);
    let fallback_time = options.default_time.unwrap_or_else(default_time);
    let duration = options
        .default_duration_minutes
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    if input.trim().is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    let text = match options.keywords {
        Some(keywords) => keywords.normalize(input),
        None => input.to_string(),
    };
    let local_reference = reference.with_timezone(&tz).naive_local();
    let mut state = ParseState::new(&text, local_reference, duration);

    location::extract_location(&mut state);
    date::resolve_date(&mut state);
    time::resolve_time(&mut state, &text);
    duration::extract_duration(&mut state, &text);

    if !state.has_date && !state.has_time {
        debug!(input = %text, "no date or time found");
        return Err(ParseFailure::Unrecognized);
    }

    let title = title::assemble_title(&state.residue);
    let start = localize(tz, state.date.and_time(state.time.unwrap_or(fallback_time)));
    let end = match end_of(start, state.duration_minutes) {
        Some(end) => end,
        None => {
            debug!(minutes = state.duration_minutes, "duration out of range, using default");
            end_of(start, duration).ok_or(ParseFailure::Unrecognized)?
        }
    };
    debug!(%title, %start, %end, location = ?state.location, "draft");

    Ok(EventDraft {
        title,
        start,
        end,
        location: state.location,
    })
}

fn end_of(start: DateTime<FixedOffset>, minutes: u32) -> Option<DateTime<FixedOffset>> {
    start.checked_add_signed(Duration::minutes(i64::from(minutes)))
}

/// Pins a wall-clock time in `tz` to an instant. The earliest reading wins
/// for a repeated local time; a skipped one is read as if it were UTC.
fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<FixedOffset> {
    tz.from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
        .fixed_offset()
}
