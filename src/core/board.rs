//! The set of timers an interactive driver works with.
//!
//! The board owns its timers and a selected index; there is always at
//! least one timer. Persisting happens only through `reset_selected` and
//! `flush`, which save a Session before any state is discarded.

use crate::core::timer::Timer;
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::utils::date;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TimerBoard {
    timers: Vec<Timer>,
    selected: usize,
    base_name: String,
    /// Monotonic counter for "<base> N" names; never reused after removal.
    created: usize,
}

impl TimerBoard {
    pub fn new(base_name: &str) -> Self {
        Self {
            timers: vec![Timer::new(format!("{base_name} 1"))],
            selected: 0,
            base_name: base_name.to_string(),
            created: 1,
        }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Timer {
        &self.timers[self.selected]
    }

    pub fn selected_mut(&mut self) -> &mut Timer {
        &mut self.timers[self.selected]
    }

    /// Append a timer and select it. Blank names fall back to "<base> N".
    pub fn add(&mut self, name: Option<&str>) -> &Timer {
        self.created += 1;
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("{} {}", self.base_name, self.created),
        };
        self.timers.push(Timer::new(name));
        self.selected = self.timers.len() - 1;
        &self.timers[self.selected]
    }

    /// Drop the selected timer without saving it. Refuses to remove the last one.
    pub fn remove_selected(&mut self) -> Option<Timer> {
        if self.timers.len() <= 1 {
            return None;
        }
        let removed = self.timers.remove(self.selected);
        if self.selected >= self.timers.len() {
            self.selected = self.timers.len() - 1;
        }
        Some(removed)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.timers.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.timers.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.timers.len() - 1) % self.timers.len();
    }

    /// Lap the selected timer; refused while nothing has been timed yet.
    pub fn lap_selected(&mut self) -> bool {
        self.lap_selected_at(Instant::now())
    }

    pub fn lap_selected_at(&mut self, now: Instant) -> bool {
        let timer = self.selected_mut();
        if timer.elapsed_at(now) == Duration::ZERO {
            return false;
        }
        timer.lap_at(now);
        true
    }

    /// Save the selected timer's usage, then reset it.
    ///
    /// Returns the new row id, or `None` when there was nothing to save.
    /// On a save error the timer keeps its state and the error is returned.
    pub fn reset_selected(&mut self, store: &SessionStore) -> AppResult<Option<i64>> {
        self.reset_selected_at(store, Instant::now())
    }

    pub fn reset_selected_at(
        &mut self,
        store: &SessionStore,
        now: Instant,
    ) -> AppResult<Option<i64>> {
        let timer = self.selected_mut();
        let id = save_timer(timer, store, now)?;
        timer.reset();
        Ok(id)
    }

    /// Save every timer with recorded time and reset it. Used on quit.
    ///
    /// Stops at the first failing save; timers saved before it are reset,
    /// the rest keep their state.
    pub fn flush(&mut self, store: &SessionStore) -> AppResult<usize> {
        self.flush_at(store, Instant::now())
    }

    pub fn flush_at(&mut self, store: &SessionStore, now: Instant) -> AppResult<usize> {
        let mut saved = 0;
        for timer in self.timers.iter_mut() {
            if save_timer(timer, store, now)?.is_some() {
                timer.reset();
                saved += 1;
            }
        }
        Ok(saved)
    }
}

fn save_timer(timer: &Timer, store: &SessionStore, now: Instant) -> AppResult<Option<i64>> {
    if timer.elapsed_at(now) == Duration::ZERO {
        return Ok(None);
    }
    let session = timer.to_session_at(now, date::now(), None);
    let id = store.save(&session)?;
    Ok(Some(id))
}
