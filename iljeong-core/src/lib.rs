pub mod calendar;
pub mod config;
pub mod draft;
pub mod error;
pub mod extract;
pub mod iljeong;
pub mod keywords;
pub mod render;

#[cfg(test)]
mod tests;

pub use calendar::{
    CalendarEvent, CreateEventRequest, DeleteEventRequest, EventTime, EventWhen,
    ListEventsRequest, PatchEventRequest,
};
pub use config::Config;
pub use draft::{DURATION_PRESETS, DraftPatch, EventDraft, PLACEHOLDER_TITLE};
pub use error::{DraftError, ParseFailure, PayloadError};
pub use extract::{ExtractOptions, extract_draft};
pub use iljeong::Iljeong;
pub use keywords::{Keyword, Keywords};
