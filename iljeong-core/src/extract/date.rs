use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::debug;

use super::parse_state::ParseState;

static RELATIVE_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(일|주|달|개월)\s*(이후|뒤|후)").expect("valid regex"));
static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:((?:다다음|다음|이번)\s*주|금주|차주|내주)\s*)?(월|화|수|목|금|토|일)요일")
        .expect("valid regex")
});
static WEEK_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:다다음|다음|이번)\s*주|금주|차주|내주").expect("valid regex"));
static SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})").expect("valid regex"));
static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid regex"));

type Finder = fn(&str) -> Option<(DateSignal, Option<Range<usize>>)>;

/// Which week a weekday or week expression points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeekModifier {
    /// 이번 주, 금주
    This,
    /// 다음 주, 차주, 내주
    Next,
    /// 다다음 주
    AfterNext,
}

impl WeekModifier {
    fn parse(s: &str) -> Option<Self> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match s.as_str() {
            "이번주" | "금주" => Some(Self::This),
            "다음주" | "차주" | "내주" => Some(Self::Next),
            "다다음주" => Some(Self::AfterNext),
            _ => None,
        }
    }
}

/// A date expression found in the residue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DateSignal {
    /// 오늘, 내일, 모레 and their formal forms, as a day offset.
    Keyword(i64),
    RelativeDays(i64),
    RelativeMonths(u32),
    Weekday {
        target: Weekday,
        modifier: Option<WeekModifier>,
    },
    WeekOnly(WeekModifier),
    Slash { month: u32, day: u32 },
    Iso { year: i32, month: u32, day: u32 },
}

impl DateSignal {
    /// The date this signal resolves to, starting from `date`.
    /// `None` when the signal names an impossible date.
    pub fn resolve(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateSignal::Keyword(days) | DateSignal::RelativeDays(days) => {
                date.checked_add_signed(Duration::days(days))
            }
            DateSignal::RelativeMonths(months) => date.checked_add_months(Months::new(months)),
            DateSignal::Weekday { target, modifier } => {
                let current = i64::from(date.weekday().num_days_from_sunday());
                let mut days = i64::from(target.num_days_from_sunday()) - current;
                match modifier {
                    Some(WeekModifier::Next) => days += 7,
                    Some(WeekModifier::AfterNext) => days += 14,
                    Some(WeekModifier::This) if days <= 0 => days += 7,
                    // A bare weekday that already passed stays in the past.
                    _ => {}
                }
                date.checked_add_signed(Duration::days(days))
            }
            DateSignal::WeekOnly(modifier) => {
                let days = match modifier {
                    WeekModifier::This => 0,
                    WeekModifier::Next => 7,
                    WeekModifier::AfterNext => 14,
                };
                date.checked_add_signed(Duration::days(days))
            }
            DateSignal::Slash { month, day } => NaiveDate::from_ymd_opt(date.year(), month, day),
            DateSignal::Iso { year, month, day } => NaiveDate::from_ymd_opt(year, month, day),
        }
    }
}

/// Resolves the date passes in their fixed order.
///
/// The keyword, relative, weekday and week-only passes form a priority chain:
/// each runs only while no date has been found. Slash and ISO dates always
/// run and override whatever was inferred before them.
pub fn resolve_date(state: &mut ParseState) {
    let chain: [Finder; 4] = [find_keyword, find_relative, find_weekday, find_week_only];
    for find in chain {
        if state.has_date {
            break;
        }
        if let Some((signal, span)) = find(&state.residue) {
            apply(state, signal, span);
        }
    }

    let overrides: [Finder; 2] = [find_slash, find_iso];
    for find in overrides {
        if let Some((signal, span)) = find(&state.residue) {
            apply(state, signal, span);
        }
    }
}

fn apply(state: &mut ParseState, signal: DateSignal, span: Option<Range<usize>>) {
    let Some(date) = signal.resolve(state.date) else {
        debug!(?signal, "ignoring impossible date");
        return;
    };
    debug!(?signal, %date, "date");
    state.set_date(date);
    if let Some(span) = span {
        state.consume(span);
    }
}

/// The literal keyword stays in the residue; the title sweep removes it.
fn find_keyword(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let offset = if residue.contains("오늘") || residue.contains("금일") {
        0
    } else if residue.contains("내일") || residue.contains("명일") || residue.contains("익일") {
        1
    } else if residue.contains("모레") {
        2
    } else {
        return None;
    };
    Some((DateSignal::Keyword(offset), None))
}

fn find_relative(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let caps = RELATIVE_DAY_RE.captures(residue)?;
    let n: u32 = caps[1].parse().ok()?;
    let signal = match &caps[2] {
        "일" => DateSignal::RelativeDays(i64::from(n)),
        "주" => DateSignal::RelativeDays(i64::from(n) * 7),
        _ => DateSignal::RelativeMonths(n),
    };
    Some((signal, Some(caps.get(0)?.range())))
}

fn find_weekday(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let caps = WEEKDAY_RE.captures(residue)?;
    let target = match &caps[2] {
        "월" => Weekday::Mon,
        "화" => Weekday::Tue,
        "수" => Weekday::Wed,
        "목" => Weekday::Thu,
        "금" => Weekday::Fri,
        "토" => Weekday::Sat,
        _ => Weekday::Sun,
    };
    let modifier = caps.get(1).and_then(|m| WeekModifier::parse(m.as_str()));
    Some((
        DateSignal::Weekday { target, modifier },
        Some(caps.get(0)?.range()),
    ))
}

fn find_week_only(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let m = WEEK_ONLY_RE.find(residue)?;
    let modifier = WeekModifier::parse(m.as_str())?;
    Some((DateSignal::WeekOnly(modifier), Some(m.range())))
}

fn find_slash(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let caps = SLASH_RE.captures(residue)?;
    let signal = DateSignal::Slash {
        month: caps[1].parse().ok()?,
        day: caps[2].parse().ok()?,
    };
    Some((signal, Some(caps.get(0)?.range())))
}

fn find_iso(residue: &str) -> Option<(DateSignal, Option<Range<usize>>)> {
    let caps = ISO_RE.captures(residue)?;
    let signal = DateSignal::Iso {
        year: caps[1].parse().ok()?,
        month: caps[2].parse().ok()?,
        day: caps[3].parse().ok()?,
    };
    Some((signal, Some(caps.get(0)?.range())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{date, reference};

    // reference() is Wednesday 2024-01-10.
    fn run(input: &str) -> ParseState {
        let mut state = ParseState::new(input, reference(), 60);
        resolve_date(&mut state);
        state
    }

    #[test]
    fn literal_keywords() {
        assert_eq!(run("오늘 회의").date, date(2024, 1, 10));
        assert_eq!(run("금일 회의").date, date(2024, 1, 10));
        assert_eq!(run("내일 회의").date, date(2024, 1, 11));
        assert_eq!(run("명일 회의").date, date(2024, 1, 11));
        assert_eq!(run("익일 회의").date, date(2024, 1, 11));
        assert_eq!(run("모레 회의").date, date(2024, 1, 12));
        assert!(run("모레 회의").has_date);
    }

    #[test]
    fn literal_keyword_stays_in_residue() {
        assert_eq!(run("내일 회의").residue, "내일 회의");
    }

    #[test]
    fn relative_offsets() {
        let days = run("3일 뒤 회의");
        assert_eq!(days.date, date(2024, 1, 13));
        assert!(!days.residue.contains('3'));

        assert_eq!(run("2주 후 회의").date, date(2024, 1, 24));
        assert_eq!(run("1달 이후 회의").date, date(2024, 2, 10));
        assert_eq!(run("3개월 뒤 정기검진").date, date(2024, 4, 10));
    }

    #[test]
    fn month_offset_clamps_to_month_end() {
        let mut state = ParseState::new("1개월 뒤", reference(), 60);
        state.date = date(2024, 1, 31);
        resolve_date(&mut state);
        assert_eq!(state.date, date(2024, 2, 29));
    }

    #[test]
    fn keyword_wins_over_relative_offset() {
        assert_eq!(run("내일 3일 뒤").date, date(2024, 1, 11));
    }

    #[test]
    fn this_week_weekday_already_past_moves_forward() {
        let state = run("이번주 화요일 약속");
        assert_eq!(state.date, date(2024, 1, 16));
        assert!(!state.residue.contains("화요일"));
        assert!(!state.residue.contains("이번"));
    }

    #[test]
    fn this_week_weekday_today_moves_forward() {
        assert_eq!(run("이번 주 수요일").date, date(2024, 1, 17));
        assert_eq!(run("금주 수요일").date, date(2024, 1, 17));
    }

    #[test]
    fn this_week_weekday_upcoming() {
        assert_eq!(run("이번 주 토요일").date, date(2024, 1, 13));
    }

    #[test]
    fn next_week_family() {
        assert_eq!(run("다음주 월요일").date, date(2024, 1, 15));
        assert_eq!(run("다음 주 금요일").date, date(2024, 1, 19));
        assert_eq!(run("차주 금요일").date, date(2024, 1, 19));
        assert_eq!(run("내주 금요일").date, date(2024, 1, 19));
    }

    #[test]
    fn week_after_next() {
        assert_eq!(run("다다음주 금요일").date, date(2024, 1, 26));
    }

    #[test]
    fn bare_weekday_upcoming() {
        assert_eq!(run("금요일 회식").date, date(2024, 1, 12));
    }

    // A bare weekday that already passed resolves into the past.
    #[test]
    fn bare_weekday_already_past_is_not_advanced() {
        assert_eq!(run("월요일 회의").date, date(2024, 1, 8));
        assert_eq!(run("수요일 회의").date, date(2024, 1, 10));
    }

    #[test]
    fn week_only_expressions() {
        assert_eq!(run("다음주 회의").date, date(2024, 1, 17));
        assert_eq!(run("차주 회의").date, date(2024, 1, 17));
        assert_eq!(run("다다음 주 회의").date, date(2024, 1, 24));
        let this_week = run("이번주 회의");
        assert_eq!(this_week.date, date(2024, 1, 10));
        assert!(this_week.has_date);
    }

    #[test]
    fn slash_date_keeps_year() {
        let state = run("2/20 발표");
        assert_eq!(state.date, date(2024, 2, 20));
        assert!(!state.residue.contains('/'));
    }

    #[test]
    fn iso_date() {
        assert_eq!(run("2025-03-01 이사").date, date(2025, 3, 1));
    }

    #[test]
    fn explicit_dates_override_inferred_ones() {
        assert_eq!(run("내일 2/20 발표").date, date(2024, 2, 20));
        assert_eq!(run("다음주 월요일 2025-03-01").date, date(2025, 3, 1));
    }

    #[test]
    fn impossible_dates_are_ignored() {
        let state = run("2/30 발표");
        assert!(!state.has_date);
        assert_eq!(state.date, date(2024, 1, 10));
        assert!(state.residue.contains("2/30"));
    }

    #[test]
    fn nothing_found() {
        let state = run("회의 준비하기");
        assert!(!state.has_date);
        assert_eq!(state.residue, "회의 준비하기");
    }
}
