use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Canonical date/time/location vocabulary. The strum serialization is the
/// Korean surface form the extractor looks for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString, IntoStaticStr,
)]
pub enum Keyword {
    #[strum(serialize = "오늘")]
    Today,
    #[strum(serialize = "금일")]
    TodayFormal,
    #[strum(serialize = "내일")]
    Tomorrow,
    #[strum(serialize = "명일")]
    TomorrowFormal,
    #[strum(serialize = "익일")]
    FollowingDay,
    #[strum(serialize = "모레")]
    DayAfterTomorrow,
    #[strum(serialize = "이번")]
    This,
    #[strum(serialize = "다음")]
    Next,
    #[strum(serialize = "다다음")]
    AfterNext,
    #[strum(serialize = "금주")]
    ThisWeek,
    #[strum(serialize = "차주")]
    NextWeek,
    #[strum(serialize = "내주")]
    NextWeekFormal,
    #[strum(serialize = "주")]
    Week,
    #[strum(serialize = "요일")]
    DayOfWeek,
    #[strum(serialize = "새벽")]
    Dawn,
    #[strum(serialize = "아침")]
    Morning,
    #[strum(serialize = "오전")]
    Am,
    #[strum(serialize = "점심")]
    Lunch,
    #[strum(serialize = "오후")]
    Pm,
    #[strum(serialize = "저녁")]
    Evening,
    #[strum(serialize = "밤")]
    Night,
    #[strum(serialize = "정오")]
    Noon,
    #[strum(serialize = "자정")]
    Midnight,
    #[strum(serialize = "장소")]
    Place,
    #[strum(serialize = "시간")]
    Hours,
    #[strum(serialize = "분")]
    Minutes,
    #[strum(serialize = "반")]
    Half,
    #[strum(serialize = "시")]
    OClock,
    #[strum(serialize = "뒤")]
    Later,
    #[strum(serialize = "후")]
    After,
    #[strum(serialize = "이후")]
    Afterwards,
    #[strum(serialize = "개월")]
    Months,
}

impl Keyword {
    /// Keywords that name a coarse part of the day (오전, 오후, 저녁 ...).
    pub fn is_period(self) -> bool {
        matches!(
            self,
            Keyword::Dawn
                | Keyword::Morning
                | Keyword::Am
                | Keyword::Lunch
                | Keyword::Pm
                | Keyword::Evening
                | Keyword::Night
        )
    }
}

/// Every canonical surface form, longest first, as one alternation.
static SWEEP_RE: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&'static str> = Keyword::iter().map(<&'static str>::from).collect();
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    let pattern = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).expect("keyword alternation is a valid regex")
});

/// Alias → canonical keyword table.
///
/// Seeded with every canonical surface form mapping to itself. User-defined
/// synonyms (the `[synonyms]` table of `config.toml`) are added with
/// [`extend`](Self::extend) and rewritten to their canonical form by
/// [`normalize`](Self::normalize) before extraction runs, so the extractor
/// itself only ever sees canonical words.
///
/// A `Keywords` value is plain data: build one per configuration and pass it
/// by reference. Nothing here is global or mutated during extraction.
#[derive(Debug, Clone)]
pub struct Keywords {
    aliases: HashMap<String, Keyword>,
}

impl Default for Keywords {
    fn default() -> Self {
        let aliases = Keyword::iter()
            .map(|keyword| (keyword.as_ref().to_string(), keyword))
            .collect();
        Self { aliases }
    }
}

impl Keywords {
    /// Adds `(alias, target)` pairs.
    ///
    /// `target` must already be known (a canonical word or an earlier alias),
    /// otherwise the pair is ignored. Canonical words can't be re-aliased,
    /// e.g. `오늘 = "내일"` is dropped.
    ///
    /// ```toml
    /// [synonyms]
    /// 낼 = "내일"
    /// 담주 = "다음"
    /// ```
    pub fn extend(&mut self, synonyms: &[(String, String)]) {
        for (alias, target) in synonyms {
            let alias = alias.trim();
            if alias.is_empty() || Self::is_canonical(alias) {
                continue;
            }
            if let Some(&canonical) = self.aliases.get(target.trim()) {
                self.aliases.insert(alias.to_string(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical surface form (eg "내일").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `word` is the given keyword or one of its synonyms.
    pub fn matches(&self, keyword: Keyword, word: &str) -> bool {
        self.aliases
            .get(word.trim())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }

    /// Rewrites every registered synonym found in `input` to its canonical
    /// surface form. Longer aliases win over shorter ones sharing a prefix.
    pub fn normalize(&self, input: &str) -> String {
        let mut synonyms: Vec<&str> = self
            .aliases
            .keys()
            .map(String::as_str)
            .filter(|alias| !Self::is_canonical(alias))
            .collect();
        if synonyms.is_empty() {
            return input.to_string();
        }
        synonyms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let pattern = synonyms
            .iter()
            .map(|alias| regex::escape(alias))
            .collect::<Vec<_>>()
            .join("|");
        let Ok(re) = Regex::new(&pattern) else {
            return input.to_string();
        };
        re.replace_all(input, |caps: &Captures| {
            self.aliases
                .get(&caps[0])
                .map(|keyword| keyword.as_ref().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }

    /// Removes every canonical keyword from `input`, longest first
    /// (so `시간` goes before `시` and `다다음` before `다음`).
    pub fn strip_all(input: &str) -> String {
        SWEEP_RE.replace_all(input, "").into_owned()
    }
}
