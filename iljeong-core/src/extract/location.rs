use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::parse_state::ParseState;

static AT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\S+)").expect("valid regex"));
static PLACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"장소\s+(\S+)").expect("valid regex"));

/// Pulls one location out of the residue: `@token` first, then `장소 token`.
pub fn extract_location(state: &mut ParseState) {
    let found = [&*AT_RE, &*PLACE_RE].into_iter().find_map(|re| {
        re.captures(&state.residue)
            .and_then(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())))
    });

    if let Some((span, location)) = found {
        debug!(%location, "location");
        state.consume(span);
        state.location = Some(location);
    }
}
