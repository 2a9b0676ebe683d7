use once_cell::sync::Lazy;
use regex::Regex;

use crate::{draft::PLACEHOLDER_TITLE, keywords::Keywords};

static LEADING_WEEKDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[가-힣]{1,2}요일\s*").expect("valid regex"));
static SYMBOLS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@\d/\-]").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turns what is left of the sentence into a title.
pub fn assemble_title(residue: &str) -> String {
    let title = LEADING_WEEKDAY_RE.replace(residue, "");
    let title = Keywords::strip_all(&title);
    let title = SYMBOLS_RE.replace_all(&title, "");
    let title = WHITESPACE_RE.replace_all(&title, " ");
    let title = title.trim();

    if title.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        title.to_string()
    }
}
