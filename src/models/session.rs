use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage format for wall-clock timestamps (`sessions.start_time`, `end_time`).
/// Fixed-width so that lexical order equals chronological order.
pub const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepts any fractional precision (or none) when reading back.
pub const DATETIME_PARSE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One completed timer usage. Immutable once saved.
///
/// `duration` is authoritative: it is never re-derived from
/// `start_time`/`end_time`, because paused intervals are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub timer_name: String,
    pub start_time: NaiveDateTime, // ⇔ sessions.start_time (TEXT, local ISO 8601)
    pub end_time: Option<NaiveDateTime>,
    pub duration: f64, // seconds
    pub laps: Vec<f64>, // ⇔ sessions.laps (JSON array of lap durations)
    #[serde(default)]
    pub notes: Option<String>,
}

impl Session {
    pub fn new(timer_name: impl Into<String>, start_time: NaiveDateTime, duration: f64) -> Self {
        Self {
            timer_name: timer_name.into(),
            start_time,
            end_time: None,
            duration,
            laps: Vec::new(),
            notes: None,
        }
    }

    pub fn with_end(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_laps(mut self, laps: Vec<f64>) -> Self {
        self.laps = laps;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Day-bucket this session belongs to.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format(DATETIME_FMT).to_string()
    }

    pub fn end_str(&self) -> Option<String> {
        self.end_time.map(|t| t.format(DATETIME_FMT).to_string())
    }
}

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_PARSE_FMT).ok()
}
