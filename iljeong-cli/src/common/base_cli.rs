use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use clap::Parser;
use std::io::{self, IsTerminal};

use crate::render::ColorMode;

/// Turn a Korean sentence into a calendar event draft
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct BaseCli {
    /// Resolve relative words ("내일", "3시간 뒤") against this instant instead of now.
    /// RFC 3339, e.g. `2024-01-10T09:00:00+09:00`.
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<DateTime<FixedOffset>>,
    /// IANA zone the sentence is read in (e.g. `Asia/Seoul`). Overrides `time_zone` from config.
    #[arg(long, env = "ILJEONG_TZ", value_parser = parse_zone)]
    pub tz: Option<Tz>,
    /// Event length in minutes, replacing whatever the sentence says (e.g. 60, 90, 120, 240).
    #[arg(long, short)]
    pub duration: Option<u32>,
    /// Print the calendar create request as JSON instead of the summary.
    #[arg(long, conflicts_with = "short")]
    pub json: bool,
    /// Only print the date, time, title and location on one line.
    #[arg(long, short)]
    pub short: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// The sentence (e.g., `iljeong 내일 오후 3시 치과 @강남역`). Opens $EDITOR when empty.
    #[arg()]
    pub text: Vec<String>,
}

impl BaseCli {
    pub fn new() -> Self {
        BaseCli::parse()
    }

    pub fn use_color(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    false
                } else {
                    io::stdout().is_terminal()
                }
            }
        }
    }
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s.trim()).map_err(|e| format!("'{s}' is not RFC 3339: {e}"))
}

fn parse_zone(s: &str) -> Result<Tz, String> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| format!("unknown time zone '{s}'"))
}
