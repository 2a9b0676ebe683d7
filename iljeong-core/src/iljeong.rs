use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::{
    Config,
    draft::EventDraft,
    error::ParseFailure,
    extract::{ExtractOptions, extract_draft},
    keywords::Keywords,
};

pub struct Iljeong {
    pub config: Config,
    keywords: Keywords,
}

impl Iljeong {
    /// Creates a new `Iljeong` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Creates a new `Iljeong` instance with a specific `Config`.
    pub fn with_config(config: Config) -> Self {
        let keywords = config.keywords();
        Self { config, keywords }
    }

    /// Extracts a draft with the configured zone, defaults and synonyms.
    /// `reference` defaults to now.
    pub fn extract(
        &self,
        input: &str,
        reference: Option<DateTime<Utc>>,
    ) -> Result<EventDraft, ParseFailure> {
        let options = ExtractOptions {
            reference_instant: reference,
            time_zone: Some(self.config.time_zone),
            default_time: Some(self.config.default_time),
            default_duration_minutes: Some(self.config.default_duration_minutes),
            keywords: Some(&self.keywords),
        };
        extract_draft(input, Some(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{mk_config, reference_instant, seoul};
    use chrono::NaiveTime;

    fn mk_iljeong() -> Iljeong {
        Iljeong::with_config(mk_config())
    }

    #[test]
    fn extracts_with_configured_defaults() {
        let mut config = mk_config();
        config.default_time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        config.default_duration_minutes = 30;
        let iljeong = Iljeong::with_config(config);

        let draft = iljeong.extract("모레 미용실", Some(reference_instant())).unwrap();

        assert_eq!(draft.title, "미용실");
        assert_eq!(draft.start, seoul(2024, 1, 12, 10, 0));
        assert_eq!(draft.end, seoul(2024, 1, 12, 10, 30));
    }

    #[test]
    fn applies_configured_synonyms() {
        let mut config = mk_config();
        config.synonyms = vec![("담주".to_string(), "차주".to_string())];
        let iljeong = Iljeong::with_config(config);

        let draft = iljeong
            .extract("담주 월요일 오후 2시 팀 회의", Some(reference_instant()))
            .unwrap();

        assert_eq!(draft.title, "팀 회의");
        assert_eq!(draft.start, seoul(2024, 1, 15, 14, 0));
    }

    #[test]
    fn reports_unrecognized_input() {
        let iljeong = mk_iljeong();
        assert_eq!(
            iljeong.extract("회의 준비하기", Some(reference_instant())),
            Err(ParseFailure::Unrecognized)
        );
    }

    #[test]
    fn reads_in_the_configured_zone() {
        let mut config = mk_config();
        config.time_zone = chrono_tz::America::New_York;
        let iljeong = Iljeong::with_config(config);

        // 2024-01-09 15:00 UTC is 10:00 in New York, still the 9th.
        let draft = iljeong.extract("내일 8:30 회의", Some(reference_instant())).unwrap();

        assert_eq!(draft.start.to_rfc3339(), "2024-01-10T08:30:00-05:00");
    }
}
