use super::Session;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate of every session whose `start_time` falls on `date`.
/// Always computed from the session log, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_time: f64,
    pub session_count: u32,
    pub timer_names: Vec<String>,
    pub average_session_duration: f64,
}

impl DailyStats {
    /// Group sessions into one bucket per calendar day of `start_time`,
    /// most recent day first. Days without sessions produce no bucket.
    /// `timer_names` keeps the order in which names first appear in `sessions`.
    pub fn from_sessions(sessions: &[Session]) -> Vec<DailyStats> {
        let mut buckets: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();

        for s in sessions {
            let bucket = buckets.entry(s.date()).or_insert_with(|| DailyStats {
                date: s.date(),
                total_time: 0.0,
                session_count: 0,
                timer_names: Vec::new(),
                average_session_duration: 0.0,
            });
            bucket.total_time += s.duration;
            bucket.session_count += 1;
            if !bucket.timer_names.contains(&s.timer_name) {
                bucket.timer_names.push(s.timer_name.clone());
            }
        }

        buckets
            .into_values()
            .rev()
            .map(|mut b| {
                b.average_session_duration = b.total_time / b.session_count as f64;
                b
            })
            .collect()
    }
}

/// Scalar aggregate for one timer name inside a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerStats {
    pub timer_name: String,
    pub total_sessions: u32,
    pub total_time: f64,
    pub average_duration: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    pub active_days: u32,
}

impl TimerStats {
    /// `None` is the "no data" sentinel: no session of `timer_name` in `sessions`.
    pub fn from_sessions(timer_name: &str, sessions: &[Session]) -> Option<TimerStats> {
        let matching: Vec<&Session> = sessions
            .iter()
            .filter(|s| s.timer_name == timer_name)
            .collect();

        if matching.is_empty() {
            return None;
        }

        let total_time: f64 = matching.iter().map(|s| s.duration).sum();
        let min_duration = matching.iter().map(|s| s.duration).fold(f64::INFINITY, f64::min);
        let max_duration = matching.iter().map(|s| s.duration).fold(0.0, f64::max);
        let active_days = matching.iter().map(|s| s.date()).collect::<BTreeSet<_>>().len();

        Some(TimerStats {
            timer_name: timer_name.to_string(),
            total_sessions: matching.len() as u32,
            total_time,
            average_duration: total_time / matching.len() as f64,
            min_duration,
            max_duration,
            active_days: active_days as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub session_count: u32,
    pub total_time: f64,
    pub timer_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub active_days: u32,
    pub window_days: u32,
    pub total_time: f64,
    pub session_count: u32,
    pub average_per_day: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_datetime;

    fn session(name: &str, start: &str, duration: f64) -> Session {
        Session::new(name, parse_datetime(start).unwrap(), duration)
    }

    #[test]
    fn buckets_by_calendar_day_newest_first() {
        let sessions = vec![
            session("focus", "2025-02-28T23:59:00", 60.0),
            session("read", "2025-03-01T00:01:00", 30.0),
            session("focus", "2025-03-01T10:00:00", 90.0),
            session("read", "2025-03-01T18:00:00", 120.0),
        ];

        let days = DailyStats::from_sessions(&sessions);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(days[0].session_count, 3);
        assert_eq!(days[0].total_time, 240.0);
        assert_eq!(days[0].average_session_duration, 80.0);
        assert_eq!(days[0].timer_names, vec!["read", "focus"]);

        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(days[1].session_count, 1);
    }

    #[test]
    fn no_sessions_no_buckets() {
        assert!(DailyStats::from_sessions(&[]).is_empty());
    }

    #[test]
    fn timer_stats_aggregates_one_name() {
        let sessions = vec![
            session("focus", "2025-03-01T09:00:00", 100.0),
            session("focus", "2025-03-01T13:00:00", 50.0),
            session("read", "2025-03-02T09:00:00", 999.0),
            session("focus", "2025-03-03T09:00:00", 150.0),
        ];

        let st = TimerStats::from_sessions("focus", &sessions).unwrap();
        assert_eq!(st.total_sessions, 3);
        assert_eq!(st.total_time, 300.0);
        assert_eq!(st.average_duration, 100.0);
        assert_eq!(st.min_duration, 50.0);
        assert_eq!(st.max_duration, 150.0);
        assert_eq!(st.active_days, 2);
    }

    #[test]
    fn timer_stats_sentinel_for_unknown_name() {
        let sessions = vec![session("focus", "2025-03-01T09:00:00", 100.0)];
        assert!(TimerStats::from_sessions("nope", &sessions).is_none());
    }
}
