use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::parse_state::ParseState;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(시간|분)").expect("valid regex"));

/// Reads an explicit duration from the whole sentence (not the residue), so
/// "3시간 뒤" can be both a start offset and a length.
///
/// Only the first match counts: "2시간 30분" is 120 minutes.
pub fn extract_duration(state: &mut ParseState, input: &str) {
    let Some(caps) = DURATION_RE.captures(input) else {
        return;
    };
    let Ok(n) = caps[1].parse::<u32>() else {
        return;
    };
    let minutes = match &caps[2] {
        "시간" => n.checked_mul(60),
        _ => Some(n),
    };
    let Some(minutes) = minutes else {
        return;
    };

    debug!(minutes, "duration");
    state.duration_minutes = minutes;
    state.consume_text(&caps[0]);
}
