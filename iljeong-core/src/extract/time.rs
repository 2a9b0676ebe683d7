use chrono::{Duration, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;

use super::parse_state::ParseState;
use crate::keywords::Keyword;

static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"정오|자정").expect("valid regex"));
static NUMERAL_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(열두|열한|열|한|두|세|네|다섯|여섯|일곱|여덟|아홉)\s*(시)(?:\s*(\d{1,2})\s*분|\s*(반))?",
    )
    .expect("valid regex")
});
static PERIOD_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(새벽|아침|오전|점심|오후|저녁|밤)\s*(\d{1,2})\s*(시)(?:\s*(\d{1,2})\s*분|\s*(반))?")
        .expect("valid regex")
});
static PLAIN_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})\s*(시)(?:\s*(\d{1,2})\s*분|\s*(반))?").expect("valid regex")
});
static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"새벽|아침|오전|점심|오후|저녁|밤").expect("valid regex"));
static RELATIVE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(시간|분)\s*(이후|뒤|후)").expect("valid regex"));
static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid regex"));

/// Half of the day a period keyword points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Period {
    /// 새벽, 아침, 오전
    Morning,
    /// 점심, 오후, 저녁, 밤
    Afternoon,
}

impl Period {
    fn from_keyword(word: &str) -> Option<Self> {
        let keyword = Keyword::from_str(word).ok().filter(|k| k.is_period())?;
        match keyword {
            Keyword::Dawn | Keyword::Morning | Keyword::Am => Some(Self::Morning),
            _ => Some(Self::Afternoon),
        }
    }
}

/// A time expression found in the residue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeSignal {
    /// 정오, 자정
    Named(NaiveTime),
    /// A 12-hour reading ("세시", "오후 3시 반") already mapped to 24 hours.
    Clock(NaiveTime),
    /// "N시간 뒤", "N분 후"
    Relative(Duration),
    /// "15:45"
    TwentyFourHour(NaiveTime),
}

/// Maps a spoken hour to a 24-hour one.
///
/// With a period keyword the usual AM/PM rules apply. Without one, hours
/// 1 to 8 are read as afternoon ("세시" is 15:00, "열시" is 10:00).
pub fn to_24_hour(hour: u32, period: Option<Period>) -> u32 {
    match period {
        Some(Period::Afternoon) if hour < 12 => hour + 12,
        Some(Period::Morning) if hour == 12 => 0,
        None if (1..9).contains(&hour) => hour + 12,
        _ => hour,
    }
}

fn numeral_hour(word: &str) -> Option<u32> {
    let hour = match word {
        "한" => 1,
        "두" => 2,
        "세" => 3,
        "네" => 4,
        "다섯" => 5,
        "여섯" => 6,
        "일곱" => 7,
        "여덟" => 8,
        "아홉" => 9,
        "열" => 10,
        "열한" => 11,
        "열두" => 12,
        _ => return None,
    };
    Some(hour)
}

/// Resolves the time passes in their fixed order.
///
/// `input` is the whole (normalised) sentence; the numeral-hour pass looks
/// for a period keyword anywhere in it, not only in the residue.
///
/// 정오/자정 always apply. The numeral, period + hour, plain hour and
/// relative passes each run only while no time is resolved. An `HH:MM`
/// clock always runs last and overrides whatever was resolved before it.
pub fn resolve_time(state: &mut ParseState, input: &str) {
    if let Some((signal, span)) = find_named(&state.residue) {
        apply(state, signal, span);
    }

    let sentence_period = PERIOD_RE
        .find(input)
        .and_then(|m| Period::from_keyword(m.as_str()));

    if !state.time_resolved() {
        if let Some((signal, span)) = find_numeral_hour(&state.residue, sentence_period) {
            apply(state, signal, span);
        }
    }
    if !state.time_resolved() {
        if let Some((signal, span)) = find_period_hour(&state.residue) {
            apply(state, signal, span);
        }
    }
    if !state.time_resolved() {
        if let Some((signal, span)) = find_plain_hour(&state.residue) {
            apply(state, signal, span);
        }
    }
    if !state.time_resolved() {
        if let Some((signal, span)) = find_relative(&state.residue) {
            apply(state, signal, span);
        }
    }

    if let Some((signal, span)) = find_clock(&state.residue) {
        apply(state, signal, span);
    }
}

fn apply(state: &mut ParseState, signal: TimeSignal, span: Range<usize>) {
    match signal {
        TimeSignal::Named(time) | TimeSignal::Clock(time) | TimeSignal::TwentyFourHour(time) => {
            state.set_time(time);
        }
        TimeSignal::Relative(delta) => {
            let Some(moment) = state
                .date
                .and_time(state.reference_time)
                .checked_add_signed(delta)
            else {
                debug!(?delta, "ignoring out of range offset");
                return;
            };
            state.date = moment.date();
            state.set_time(moment.time());
        }
    }
    debug!(?signal, time = ?state.time, "time");
    state.consume(span);
}

fn find_named(residue: &str) -> Option<(TimeSignal, Range<usize>)> {
    let m = SPECIAL_RE.find(residue)?;
    let time = match m.as_str() {
        "정오" => NaiveTime::from_hms_opt(12, 0, 0)?,
        _ => NaiveTime::from_hms_opt(0, 0, 0)?,
    };
    Some((TimeSignal::Named(time), m.range()))
}

/// `N분` or `반` following the hour, in the capture groups `minute_group`
/// and `minute_group + 1`.
fn minutes_of(caps: &Captures, minute_group: usize) -> Option<u32> {
    if let Some(m) = caps.get(minute_group) {
        return m.as_str().parse().ok();
    }
    if caps.get(minute_group + 1).is_some() {
        return Some(30);
    }
    Some(0)
}

/// Iterates matches of `re`, skipping any whose `시` is really the start of
/// `시간` (a duration, not a clock hour), and returns the first one `read`
/// turns into a valid time.
fn first_clock_match(
    re: &Regex,
    residue: &str,
    hour_marker_group: usize,
    read: impl Fn(&Captures) -> Option<NaiveTime>,
) -> Option<(TimeSignal, Range<usize>)> {
    re.captures_iter(residue)
        .filter(|caps| {
            caps.get(hour_marker_group)
                .map(|si| !residue[si.end()..].starts_with('간'))
                .unwrap_or(false)
        })
        .find_map(|caps| {
            let time = read(&caps)?;
            Some((TimeSignal::Clock(time), caps.get(0)?.range()))
        })
}

fn find_numeral_hour(residue: &str, period: Option<Period>) -> Option<(TimeSignal, Range<usize>)> {
    first_clock_match(&NUMERAL_HOUR_RE, residue, 2, |caps| {
        let hour = numeral_hour(&caps[1])?;
        NaiveTime::from_hms_opt(to_24_hour(hour, period), minutes_of(caps, 3)?, 0)
    })
}

fn find_period_hour(residue: &str) -> Option<(TimeSignal, Range<usize>)> {
    first_clock_match(&PERIOD_HOUR_RE, residue, 3, |caps| {
        let period = Period::from_keyword(&caps[1]);
        let hour: u32 = caps[2].parse().ok()?;
        NaiveTime::from_hms_opt(to_24_hour(hour, period), minutes_of(caps, 4)?, 0)
    })
}

fn find_plain_hour(residue: &str) -> Option<(TimeSignal, Range<usize>)> {
    first_clock_match(&PLAIN_HOUR_RE, residue, 2, |caps| {
        let hour: u32 = caps[1].parse().ok()?;
        NaiveTime::from_hms_opt(to_24_hour(hour, None), minutes_of(caps, 3)?, 0)
    })
}

fn find_relative(residue: &str) -> Option<(TimeSignal, Range<usize>)> {
    let caps = RELATIVE_TIME_RE.captures(residue)?;
    let n: u32 = caps[1].parse().ok()?;
    let delta = match &caps[2] {
        "시간" => Duration::hours(i64::from(n)),
        _ => Duration::minutes(i64::from(n)),
    };
    Some((TimeSignal::Relative(delta), caps.get(0)?.range()))
}

fn find_clock(residue: &str) -> Option<(TimeSignal, Range<usize>)> {
    CLOCK_RE.captures_iter(residue).find_map(|caps| {
        let time = NaiveTime::from_hms_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, 0)?;
        Some((TimeSignal::TwentyFourHour(time), caps.get(0)?.range()))
    })
}
