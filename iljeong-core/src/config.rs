use anyhow::{Context, Result};
use chrono::{
    NaiveTime,
    format::{Item, StrftimeItems},
};
use chrono_tz::Tz;
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::extract::{DEFAULT_DURATION_MINUTES, DEFAULT_TIME_ZONE, default_time};
use crate::keywords::Keywords;

#[derive(Debug, Clone)]
pub struct Config {
    /// Zone the sentences are read in. Default is Asia/Seoul.
    pub time_zone: Tz,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Events get this start time if you give a date but no time (e.g. `내일 치과`).
    /// Valid format is "%H:%M" (e.g. 08:40 or 16:33). Default is 09:00.
    pub default_time: NaiveTime,
    /// Length of an event when the sentence doesn't say. Default is 60.
    pub default_duration_minutes: u32,
    /// How the CLI prints the event date.
    pub date_format: String,
    /// `(alias, canonical)` pairs from the `[synonyms]` table.
    pub synonyms: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            editor: None,
            default_time: default_time(),
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            date_format: Self::default_date_format(),
            synonyms: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    time_zone: Option<String>,
    editor: Option<String>,
    default_time: Option<String>,
    default_duration_minutes: Option<u32>,
    date_format: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// 낼 = "내일"
    /// 담주 = "차주"
    synonyms: Option<BTreeMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Self::from_file_config(file_config)
    }

    /// Builds the keyword table with this config's synonyms applied.
    pub fn keywords(&self) -> Keywords {
        let mut keywords = Keywords::default();
        keywords.extend(&self.synonyms);
        keywords
    }

    fn from_file_config(file_config: FileConfig) -> Result<Self> {
        let time_zone = match file_config.time_zone.as_deref() {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("{e}"))
                .with_context(|| format!("unknown time_zone '{name}'"))?,
            None => DEFAULT_TIME_ZONE,
        };

        let default_time = file_config
            .default_time
            .as_deref()
            .and_then(Self::parse_default_time)
            .unwrap_or_else(default_time);

        let default_duration_minutes = file_config
            .default_duration_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_DURATION_MINUTES);

        let date_format = file_config
            .date_format
            .filter(|format| Self::is_valid_date_format(format))
            .unwrap_or_else(Self::default_date_format);

        let synonyms = file_config
            .synonyms
            .unwrap_or_default()
            .into_iter()
            .filter(|(alias, _)| !Keywords::is_canonical(alias.trim()))
            .collect();

        Ok(Self {
            time_zone,
            editor: file_config.editor,
            default_time,
            default_duration_minutes,
            date_format,
            synonyms,
        })
    }

    fn default_date_format() -> String {
        "%Y-%m-%d (%a)".to_string()
    }

    /// Rejects strftime strings chrono can't render, e.g. `%Q`.
    fn is_valid_date_format(format: &str) -> bool {
        !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
    }

    /// Parse a "%H:%M" string into NaiveTime.
    fn parse_default_time(time: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("iljeong").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("iljeong").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
