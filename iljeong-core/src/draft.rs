use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Shown when nothing is left of the sentence once date, time and location are gone.
pub const PLACEHOLDER_TITLE: &str = "새 일정";

/// Duration shortcuts (minutes) offered next to the start time when editing a draft.
pub const DURATION_PRESETS: [u32; 4] = [60, 90, 120, 240];

/// A structured, not-yet-persisted calendar event.
///
/// `start` and `end` carry the offset of the zone they were resolved in, so
/// they serialize as RFC 3339 strings such as `2024-01-11T15:00:00+09:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Field overrides coming from an editing surface.
///
/// `None` leaves a field untouched. For `location`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub location: Option<Option<String>>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.start.is_none() && self.end.is_none() && self.location.is_none()
    }
}

impl EventDraft {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Moves `end` to `start + minutes`, like the duration presets do.
    pub fn with_duration(mut self, minutes: u32) -> Result<Self, DraftError> {
        self.end = self
            .start
            .checked_add_signed(Duration::minutes(i64::from(minutes)))
            .ok_or(DraftError::OutOfRange)?;
        Ok(self)
    }

    /// Overwrites the fields present in `patch`.
    /// A blank title is ignored so a draft never loses its title.
    pub fn apply_patch(&mut self, patch: DraftPatch) {
        if let Some(title) = patch.title {
            let title = title.trim();
            if !title.is_empty() {
                self.title = title.to_string();
            }
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(location) = patch.location {
            self.location = location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty());
        }
    }

    /// Extraction never guarantees `start < end` once a draft has been edited;
    /// callers check this before persisting.
    pub fn validate_range(&self) -> Result<(), DraftError> {
        if self.start >= self.end {
            return Err(DraftError::EndNotAfterStart);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 11, h, m, 0)
            .unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "치과".to_string(),
            start: at(15, 0),
            end: at(16, 0),
            location: Some("강남역".to_string()),
        }
    }

    #[test]
    fn presets_move_the_end() {
        for minutes in DURATION_PRESETS {
            let d = draft().with_duration(minutes).unwrap();
            assert_eq!(d.duration(), Duration::minutes(i64::from(minutes)));
            assert_eq!(d.start, at(15, 0));
        }
    }

    #[test]
    fn duration_past_the_calendar_end_is_rejected() {
        let mut d = draft();
        d.start = chrono::DateTime::<chrono::Utc>::MAX_UTC.fixed_offset();
        assert_eq!(d.with_duration(60), Err(DraftError::OutOfRange));
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut d = draft();
        d.apply_patch(DraftPatch {
            title: Some("  스케일링 ".to_string()),
            end: Some(at(17, 30)),
            ..Default::default()
        });
        assert_eq!(d.title, "스케일링");
        assert_eq!(d.start, at(15, 0));
        assert_eq!(d.end, at(17, 30));
        assert_eq!(d.location.as_deref(), Some("강남역"));
    }

    #[test]
    fn blank_title_patch_is_ignored() {
        let mut d = draft();
        d.apply_patch(DraftPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(d.title, "치과");
    }

    #[test]
    fn patch_can_clear_location() {
        let mut d = draft();
        d.apply_patch(DraftPatch {
            location: Some(None),
            ..Default::default()
        });
        assert!(d.location.is_none());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut d = draft();
        assert!(d.validate_range().is_ok());
        d.apply_patch(DraftPatch {
            end: Some(at(14, 0)),
            ..Default::default()
        });
        assert_eq!(d.validate_range(), Err(DraftError::EndNotAfterStart));

        let zero = draft().with_duration(0).unwrap();
        assert_eq!(zero.validate_range(), Err(DraftError::EndNotAfterStart));
    }

    #[test]
    fn serializes_rfc3339_and_skips_missing_location() {
        let mut d = draft();
        d.location = None;
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["start"], "2024-01-11T15:00:00+09:00");
        assert_eq!(json["end"], "2024-01-11T16:00:00+09:00");
        assert!(json.get("location").is_none());

        let back: EventDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, d);
    }
}
