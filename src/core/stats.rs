//! Habit-tracking statistics derived from the session log.
//!
//! Everything here is recomputed per call from `SessionStore::daily_stats`;
//! nothing is cached. The pure functions take `today` explicitly.

use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::models::{DailyStats, DailySummary, StreakData, TimerStats, WeeklySummary};
use crate::utils::date;
use chrono::NaiveDate;

/// Window used for streak computation.
pub const STREAK_WINDOW_DAYS: u32 = 365;

/// Days covered by the weekly summary average.
pub const WEEK_DAYS: u32 = 7;

/// Current streak, longest streak and total active days.
///
/// - current: consecutive active days ending today, or ending yesterday when
///   nothing was tracked yet today. A zero-time bucket counts as no activity,
///   so a zero-time today is treated like an absent one and the walk starts
///   from yesterday. A first active bucket older than yesterday means 0.
/// - longest: longest run of calendar-consecutive active days; a missing day
///   or a zero-time bucket breaks the run.
/// - total: buckets with `total_time > 0`.
///
/// Buckets dated after `today` are ignored.
pub fn streak_data(daily: &[DailyStats], today: NaiveDate) -> StreakData {
    let mut active: Vec<&DailyStats> = daily
        .iter()
        .filter(|d| d.date <= today && d.total_time > 0.0)
        .collect();

    if active.is_empty() {
        return StreakData::default();
    }

    // newest first
    active.sort_by(|a, b| b.date.cmp(&a.date));

    let mut current_streak = 0;
    let mut expected = today;
    for (i, day) in active.iter().enumerate() {
        let matches = if i == 0 {
            day.date == today || day.date == date::yesterday_of(today)
        } else {
            day.date == expected
        };
        if !matches {
            break;
        }
        current_streak += 1;
        expected = date::yesterday_of(day.date);
    }

    let mut longest_streak = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for day in active.iter().rev() {
        run = match prev {
            Some(p) if date::yesterday_of(day.date) == p => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        prev = Some(day.date);
    }

    StreakData {
        current_streak,
        longest_streak,
        total_days: active.len() as u32,
    }
}

/// Today's bucket, if anything was tracked today.
pub fn daily_summary(daily: &[DailyStats], today: NaiveDate) -> Option<DailySummary> {
    daily.iter().find(|d| d.date == today).map(|d| DailySummary {
        date: d.date,
        session_count: d.session_count,
        total_time: d.total_time,
        timer_names: d.timer_names.clone(),
    })
}

/// Totals over the given buckets, averaged over a 7-day week.
pub fn weekly_summary(daily: &[DailyStats]) -> WeeklySummary {
    let total_time: f64 = daily.iter().map(|d| d.total_time).sum();
    WeeklySummary {
        active_days: daily.iter().filter(|d| d.total_time > 0.0).count() as u32,
        window_days: WEEK_DAYS,
        total_time,
        session_count: daily.iter().map(|d| d.session_count).sum(),
        average_per_day: total_time / WEEK_DAYS as f64,
    }
}

/// Read-only façade answering summary queries against a store.
pub struct StatsEngine<'a> {
    store: &'a SessionStore,
}

impl<'a> StatsEngine<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    pub fn streak_data(&self) -> AppResult<StreakData> {
        self.streak_data_as_of(date::today())
    }

    pub fn streak_data_as_of(&self, today: NaiveDate) -> AppResult<StreakData> {
        let daily = self.store.daily_stats_as_of(today, STREAK_WINDOW_DAYS)?;
        Ok(streak_data(&daily, today))
    }

    pub fn daily_summary_as_of(&self, today: NaiveDate) -> AppResult<Option<DailySummary>> {
        let daily = self.store.daily_stats_as_of(today, 0)?;
        Ok(daily_summary(&daily, today))
    }

    /// The trailing week: today plus the six days before it.
    pub fn weekly_summary_as_of(&self, today: NaiveDate) -> AppResult<WeeklySummary> {
        let daily = self.store.daily_stats_as_of(today, WEEK_DAYS - 1)?;
        Ok(weekly_summary(&daily))
    }

    /// One row per known timer name with data in the window, sorted by name.
    pub fn timer_table_as_of(&self, today: NaiveDate, days: u32) -> AppResult<Vec<TimerStats>> {
        let mut rows = Vec::new();
        for name in self.store.timer_names()? {
            if let Some(st) = self.store.timer_stats_as_of(today, &name, days)? {
                rows.push(st);
            }
        }
        Ok(rows)
    }
}
