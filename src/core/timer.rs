//! A single stopwatch: run segments, accumulated time and lap splits.
//!
//! Every mutating method has an `*_at(now)` twin taking the monotonic
//! instant explicitly; the plain versions read `Instant::now()`.
//! Timer operations never fail: invalid transitions are no-ops.

use crate::models::Session;
use crate::utils::date;
use chrono::{Duration as ChronoDuration, NaiveDateTime};
use std::time::{Duration, Instant};

/// A recorded split. `duration` is the delta since the previous lap,
/// `recorded_at` the timer's elapsed time when the lap was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lap {
    pub duration: Duration,
    pub recorded_at: Duration,
}

#[derive(Debug, Clone)]
pub struct Timer {
    name: String,
    /// Present iff the timer is running.
    anchor: Option<Instant>,
    accumulated: Duration,
    laps: Vec<Lap>,
    /// Wall-clock time of the first start since creation or last reset.
    started_at: Option<NaiveDateTime>,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchor: None,
            accumulated: Duration::ZERO,
            laps: Vec::new(),
            started_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.started_at
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.anchor.is_some() {
            return;
        }
        if self.started_at.is_none() {
            self.started_at = Some(date::now());
        }
        self.anchor = Some(now);
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if let Some(anchor) = self.anchor.take() {
            self.accumulated += now.saturating_duration_since(anchor);
        }
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn toggle_at(&mut self, now: Instant) {
        if self.is_running() {
            self.pause_at(now);
        } else {
            self.start_at(now);
        }
    }

    /// Destructive: the caller must persist a Session first if it wants one.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.accumulated = Duration::ZERO;
        self.laps.clear();
        self.started_at = None;
    }

    pub fn lap(&mut self) {
        self.lap_at(Instant::now());
    }

    /// Appends a lap covering the time since the previous one.
    /// A lap at zero elapsed time (or twice at the same instant) yields a
    /// zero-duration lap; refusing those is the caller's policy.
    pub fn lap_at(&mut self, now: Instant) {
        let elapsed = self.elapsed_at(now);
        let lapped = self.lapped_total();
        self.laps.push(Lap {
            duration: elapsed.saturating_sub(lapped),
            recorded_at: elapsed,
        });
    }

    /// Sum of all lap durations so far.
    pub fn lapped_total(&self) -> Duration {
        self.laps.iter().map(|l| l.duration).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// `accumulated + (now - anchor)` while running, `accumulated` otherwise.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self.accumulated + now.saturating_duration_since(anchor),
            None => self.accumulated,
        }
    }

    /// Snapshot at the current instant.
    pub fn to_session(&self, end_time: NaiveDateTime, notes: Option<String>) -> Session {
        self.to_session_at(Instant::now(), end_time, notes)
    }

    /// Snapshot of the current usage as a detached Session.
    /// A timer that was never started gets `start_time = end_time - elapsed`.
    pub fn to_session_at(
        &self,
        now: Instant,
        end_time: NaiveDateTime,
        notes: Option<String>,
    ) -> Session {
        let elapsed = self.elapsed_at(now);
        let start_time = self.started_at.unwrap_or_else(|| {
            ChronoDuration::from_std(elapsed)
                .ok()
                .and_then(|d| end_time.checked_sub_signed(d))
                .unwrap_or(end_time)
        });

        Session::new(self.name.clone(), start_time, elapsed.as_secs_f64())
            .with_end(end_time)
            .with_laps(self.laps.iter().map(|l| l.duration.as_secs_f64()).collect())
            .with_notes(notes)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new("Timer 1")
    }
}
