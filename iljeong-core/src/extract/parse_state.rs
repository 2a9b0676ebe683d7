use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::ops::Range;

/// Working state of a single extraction call. Created per call, never shared.
#[derive(Debug, Clone)]
pub struct ParseState {
    /// Starts as the reference date; date passes move it.
    pub date: NaiveDate,
    /// Wall-clock time of the reference instant, the base for "N시간 뒤".
    pub reference_time: NaiveTime,
    /// Clock time resolved by a time pass.
    pub time: Option<NaiveTime>,
    /// What is left of the input once matched spans are consumed.
    pub residue: String,
    pub has_date: bool,
    pub has_time: bool,
    pub duration_minutes: u32,
    pub location: Option<String>,
}

impl ParseState {
    pub fn new(input: &str, reference: NaiveDateTime, duration_minutes: u32) -> Self {
        Self {
            date: reference.date(),
            reference_time: reference.time(),
            time: None,
            residue: input.to_string(),
            has_date: false,
            has_time: false,
            duration_minutes,
            location: None,
        }
    }

    /// Replaces a matched span of the residue with a single space so the
    /// words around it don't glue together.
    pub fn consume(&mut self, span: Range<usize>) {
        self.residue.replace_range(span, " ");
    }

    /// Consumes the first occurrence of `text`, if any is left.
    pub fn consume_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(start) = self.residue.find(text) {
            self.consume(start..start + text.len());
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.has_date = true;
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = Some(time);
        self.has_time = true;
    }

    pub fn time_resolved(&self) -> bool {
        self.time.is_some()
    }
}
