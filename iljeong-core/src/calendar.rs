//! Request bodies for a Google-Calendar-style backend.
//!
//! Only the payloads are modelled here; sending them is up to the caller.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    draft::{DraftPatch, EventDraft},
    error::PayloadError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: DateTime<FixedOffset>,
}

impl From<DateTime<FixedOffset>> for EventTime {
    fn from(date_time: DateTime<FixedOffset>) -> Self {
        Self { date_time }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl CreateEventRequest {
    pub fn from_draft(draft: &EventDraft) -> Result<Self, PayloadError> {
        let summary = draft.title.trim();
        if summary.is_empty() {
            return Err(PayloadError::MissingDraftFields);
        }
        Ok(Self {
            summary: summary.to_string(),
            location: draft.location.clone(),
            start: draft.start.into(),
            end: draft.end.into(),
        })
    }
}

/// Partial update. Omitted fields are left alone by the backend; a
/// `location` of `Some(None)` is sent as `null` and clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchEventRequest {
    pub event_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
}

impl PatchEventRequest {
    pub fn from_patch(event_id: &str, patch: &DraftPatch) -> Result<Self, PayloadError> {
        let event_id = event_id.trim();
        if event_id.is_empty() || patch.is_empty() {
            return Err(PayloadError::MissingPatchFields);
        }
        Ok(Self {
            event_id: event_id.to_string(),
            summary: patch
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            location: patch.location.clone(),
            start: patch.start.map(EventTime::from),
            end: patch.end.map(EventTime::from),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventRequest {
    pub event_id: String,
}

impl DeleteEventRequest {
    pub fn new(event_id: &str) -> Result<Self, PayloadError> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Err(PayloadError::MissingEventId);
        }
        Ok(Self {
            event_id: event_id.to_string(),
        })
    }
}

/// How far ahead the upcoming-events list looks.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;
pub const UPCOMING_MAX_RESULTS: u32 = 10;

/// Query for the next events on the calendar, soonest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsRequest {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub max_results: u32,
    /// Expand recurring events into their occurrences.
    pub single_events: bool,
    pub order_by: &'static str,
}

impl ListEventsRequest {
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        let time_max = now
            .checked_add_signed(Duration::days(UPCOMING_WINDOW_DAYS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            time_min: now,
            time_max,
            max_results: UPCOMING_MAX_RESULTS,
            single_events: true,
            order_by: "startTime",
        }
    }
}

/// Start or end of a listed event. All-day events only carry `date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWhen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl EventWhen {
    pub fn is_all_day(&self) -> bool {
        self.date_time.is_none()
    }
}

/// One entry of the upcoming-events list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: EventWhen,
    pub end: EventWhen,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::seoul;
    use serde_json::json;

    fn draft() -> EventDraft {
        EventDraft {
            title: "치과".to_string(),
            start: seoul(2024, 1, 11, 15, 0),
            end: seoul(2024, 1, 11, 16, 0),
            location: Some("강남역".to_string()),
        }
    }

    #[test]
    fn create_request_shape() {
        let request = CreateEventRequest::from_draft(&draft()).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "summary": "치과",
                "location": "강남역",
                "start": { "dateTime": "2024-01-11T15:00:00+09:00" },
                "end": { "dateTime": "2024-01-11T16:00:00+09:00" },
            })
        );
    }

    #[test]
    fn create_request_omits_missing_location() {
        let mut draft = draft();
        draft.location = None;
        let value = serde_json::to_value(CreateEventRequest::from_draft(&draft).unwrap()).unwrap();
        assert!(value.get("location").is_none());
    }

    #[test]
    fn create_request_needs_a_title() {
        let mut draft = draft();
        draft.title = "  ".to_string();
        assert_eq!(
            CreateEventRequest::from_draft(&draft),
            Err(PayloadError::MissingDraftFields)
        );
    }

    #[test]
    fn patch_request_only_carries_changes() {
        let patch = DraftPatch {
            title: Some("스케일링".to_string()),
            ..Default::default()
        };
        let request = PatchEventRequest::from_patch("abc123", &patch).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "eventId": "abc123", "summary": "스케일링" })
        );
    }

    #[test]
    fn patch_request_can_clear_location() {
        let patch = DraftPatch {
            location: Some(None),
            end: Some(seoul(2024, 1, 11, 17, 0)),
            ..Default::default()
        };
        let value =
            serde_json::to_value(PatchEventRequest::from_patch("abc123", &patch).unwrap()).unwrap();
        assert_eq!(value["location"], serde_json::Value::Null);
        assert_eq!(value["end"]["dateTime"], "2024-01-11T17:00:00+09:00");
        assert!(value.get("start").is_none());
    }

    #[test]
    fn patch_request_needs_id_and_changes() {
        let patch = DraftPatch {
            title: Some("회의".to_string()),
            ..Default::default()
        };
        assert_eq!(
            PatchEventRequest::from_patch("", &patch),
            Err(PayloadError::MissingPatchFields)
        );
        assert_eq!(
            PatchEventRequest::from_patch("abc123", &DraftPatch::default()),
            Err(PayloadError::MissingPatchFields)
        );
    }

    #[test]
    fn delete_request() {
        let request = DeleteEventRequest::new(" abc123 ").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "eventId": "abc123" })
        );
        assert_eq!(DeleteEventRequest::new(""), Err(PayloadError::MissingEventId));
    }

    #[test]
    fn list_request_shape() {
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 1, 9, 15, 0, 0).unwrap();
        let request = ListEventsRequest::upcoming(now);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "timeMin": "2024-01-09T15:00:00Z",
                "timeMax": "2024-02-08T15:00:00Z",
                "maxResults": 10,
                "singleEvents": true,
                "orderBy": "startTime",
            })
        );
    }

    #[test]
    fn list_window_stops_at_the_calendar_end() {
        let request = ListEventsRequest::upcoming(DateTime::<Utc>::MAX_UTC);
        assert_eq!(request.time_max, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn listed_events_deserialize() {
        let events: Vec<CalendarEvent> = serde_json::from_value(json!([
            {
                "id": "abc123",
                "summary": "치과",
                "start": { "dateTime": "2024-01-11T15:00:00+09:00" },
                "end": { "dateTime": "2024-01-11T16:00:00+09:00" },
                "location": "강남역",
                "htmlLink": "https://calendar.google.com/event?eid=abc123",
            },
            {
                "id": "def456",
                "start": { "date": "2024-01-13" },
                "end": { "date": "2024-01-14" },
            },
        ]))
        .unwrap();

        assert_eq!(events[0].summary.as_deref(), Some("치과"));
        assert_eq!(events[0].start.date_time, Some(seoul(2024, 1, 11, 15, 0)));
        assert_eq!(events[0].location.as_deref(), Some("강남역"));
        assert!(!events[0].start.is_all_day());

        assert!(events[1].summary.is_none());
        assert!(events[1].start.is_all_day());
        assert_eq!(events[1].start.date, NaiveDate::from_ymd_opt(2024, 1, 13));
        assert!(events[1].html_link.is_none());
    }
}
