//! Durable, append-only session log with windowed aggregate queries.
//!
//! The connection sits behind a `Mutex`, so one store can be shared through
//! an `Arc` between a display loop and user-triggered saves. Every `save`
//! runs in its own transaction: readers never observe a half-written row,
//! and a failed save leaves the log untouched. No retries happen here.

use crate::db::initialize::init_db;
use crate::db::log::{LogEntry, load_log, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::{
    self, DEFAULT_EXPORT_SESSIONS, EXPORT_STATS_DAYS, ExportDocument, SessionCsvRow,
};
use crate::models::{DailyStats, Session, TimerStats};
use crate::utils::date;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, TransactionBehavior};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct SessionStore {
    pool: Mutex<DbPool>,
}

impl SessionStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &str) -> AppResult<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
        })
    }

    /// Private, throw-away store (tests, dry runs).
    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
        })
    }

    fn lock(&self) -> MutexGuard<'_, DbPool> {
        // open transactions roll back on drop, so a poisoned pool is still consistent
        self.pool.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn with_conn<T>(&self, func: impl FnOnce(&mut Connection) -> AppResult<T>) -> AppResult<T> {
        let mut pool = self.lock();
        func(&mut pool.conn)
    }

    // ---------------------------
    // Writes
    // ---------------------------

    /// Append one session atomically. Returns the new row id.
    pub fn save(&self, session: &Session) -> AppResult<i64> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let id = queries::insert_session(&tx, session, &Local::now().to_rfc3339())?;
            tx.commit()?;
            Ok(id)
        })
    }

    /// Append many sessions in one transaction: all or nothing.
    pub fn save_all(&self, sessions: &[Session]) -> AppResult<usize> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let created_at = Local::now().to_rfc3339();
            for s in sessions {
                queries::insert_session(&tx, s, &created_at)?;
            }
            tx.commit()?;
            Ok(sessions.len())
        })
    }

    /// Write an audit line into the internal `log` table.
    pub fn log(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.with_conn(|conn| ttlog(conn, operation, target, message))
    }

    pub fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        self.with_conn(|conn| load_log(conn))
    }

    // ---------------------------
    // Reads
    // ---------------------------

    /// The `limit` most recently saved sessions, newest first.
    pub fn recent(&self, limit: usize) -> AppResult<Vec<Session>> {
        self.with_conn(|conn| queries::load_recent(conn, limit))
    }

    /// One bucket per day with sessions in the trailing `days`-day window
    /// (inclusive, relative to the local date), most recent day first.
    /// Sessions dated after today are outside every window.
    pub fn daily_stats(&self, days: u32) -> AppResult<Vec<DailyStats>> {
        self.daily_stats_as_of(date::today(), days)
    }

    pub fn daily_stats_as_of(&self, today: NaiveDate, days: u32) -> AppResult<Vec<DailyStats>> {
        let since = date::window_start(today, days);
        let until = date::day_after(today);
        let sessions = self.with_conn(|conn| queries::load_window(conn, since, until, None))?;
        Ok(DailyStats::from_sessions(&sessions))
    }

    /// Aggregate for one timer name; `Ok(None)` when it has no sessions in the window.
    pub fn timer_stats(&self, timer_name: &str, days: u32) -> AppResult<Option<TimerStats>> {
        self.timer_stats_as_of(date::today(), timer_name, days)
    }

    pub fn timer_stats_as_of(
        &self,
        today: NaiveDate,
        timer_name: &str,
        days: u32,
    ) -> AppResult<Option<TimerStats>> {
        let since = date::window_start(today, days);
        let until = date::day_after(today);
        let sessions =
            self.with_conn(|conn| queries::load_window(conn, since, until, Some(timer_name)))?;
        Ok(TimerStats::from_sessions(timer_name, &sessions))
    }

    pub fn timer_names(&self) -> AppResult<Vec<String>> {
        self.with_conn(|conn| queries::load_timer_names(conn))
    }

    pub fn session_count(&self) -> AppResult<i64> {
        self.with_conn(|conn| queries::count_sessions(conn))
    }

    pub fn date_range(&self) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        self.with_conn(|conn| queries::date_range(conn))
    }

    /// `PRAGMA integrity_check` result ("ok" when healthy).
    pub fn integrity_check(&self) -> AppResult<String> {
        self.with_conn(|conn| Ok(conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?))
    }

    pub fn vacuum(&self) -> AppResult<()> {
        self.with_conn(|conn| Ok(conn.execute_batch("VACUUM;")?))
    }

    // ---------------------------
    // Export / import
    // ---------------------------

    /// Snapshot for export: up to `session_limit` most recent sessions plus
    /// the 365-day daily stats, stamped with `now`.
    pub fn export_document(
        &self,
        session_limit: usize,
        now: NaiveDateTime,
    ) -> AppResult<ExportDocument> {
        Ok(ExportDocument {
            sessions: self.recent(session_limit)?,
            daily_stats: self.daily_stats_as_of(now.date(), EXPORT_STATS_DAYS)?,
            export_date: now,
        })
    }

    /// Write the JSON export to `path`.
    pub fn export(&self, path: &Path) -> AppResult<ExportDocument> {
        self.export_with_limit(path, DEFAULT_EXPORT_SESSIONS)
    }

    pub fn export_with_limit(&self, path: &Path, session_limit: usize) -> AppResult<ExportDocument> {
        let doc = self.export_document(session_limit, date::now())?;
        export::export_json(&doc, path)?;
        Ok(doc)
    }

    /// Write every session (most recent first) as CSV rows.
    pub fn export_csv(&self, path: &Path, session_limit: usize) -> AppResult<usize> {
        let rows: Vec<SessionCsvRow> = self
            .recent(session_limit)?
            .iter()
            .map(SessionCsvRow::from)
            .collect();
        export::export_csv(&rows, path)?;
        Ok(rows.len())
    }

    /// Append the sessions of a JSON export, oldest first, in one transaction.
    pub fn import(&self, path: &Path) -> AppResult<usize> {
        let doc = export::read_json(path)?;
        let mut sessions = doc.sessions;
        sessions.reverse();

        if let Some(bad) = sessions.iter().find(|s| !s.duration.is_finite() || s.duration < 0.0) {
            return Err(AppError::Import(format!(
                "session '{}' has an invalid duration: {}",
                bad.timer_name, bad.duration
            )));
        }

        self.save_all(&sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_datetime;

    fn session(name: &str, start: &str, duration: f64) -> Session {
        Session::new(name, parse_datetime(start).unwrap(), duration)
    }

    fn day(s: &str) -> NaiveDate {
        date::parse_date(s).unwrap()
    }

    #[test]
    fn recent_is_insertion_order_newest_first() {
        let store = SessionStore::in_memory().unwrap();
        // saved out of start_time order on purpose
        store.save(&session("b", "2025-09-02T10:00:00", 10.0)).unwrap();
        store.save(&session("a", "2025-09-01T10:00:00", 20.0)).unwrap();
        store.save(&session("c", "2025-08-01T10:00:00", 30.0)).unwrap();

        let names: Vec<String> = store.recent(2).unwrap().into_iter().map(|s| s.timer_name).collect();
        assert_eq!(names, vec!["c", "a"]);
        assert!(store.recent(0).unwrap().is_empty());
        assert_eq!(store.recent(50).unwrap().len(), 3);
    }

    #[test]
    fn save_round_trips_all_fields() {
        let store = SessionStore::in_memory().unwrap();
        let s = session("focus", "2025-09-01T09:00:00.250", 75.5)
            .with_end(parse_datetime("2025-09-01T09:01:15.750").unwrap())
            .with_laps(vec![30.25, 45.25])
            .with_notes(Some("chapter 3".into()));
        store.save(&s).unwrap();

        assert_eq!(store.recent(1).unwrap(), vec![s]);
    }

    #[test]
    fn daily_stats_window_is_inclusive_and_not_zero_filled() {
        let store = SessionStore::in_memory().unwrap();
        store.save(&session("a", "2025-03-01T08:00:00", 60.0)).unwrap();
        store.save(&session("b", "2025-02-22T23:30:00", 30.0)).unwrap();
        store.save(&session("a", "2025-02-21T12:00:00", 99.0)).unwrap();

        let today = day("2025-03-01");
        let stats = store.daily_stats_as_of(today, 7).unwrap();
        let dates: Vec<NaiveDate> = stats.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day("2025-03-01"), day("2025-02-22")]);

        let only_today = store.daily_stats_as_of(today, 0).unwrap();
        assert_eq!(only_today.len(), 1);
        assert_eq!(only_today[0].total_time, 60.0);
    }

    #[test]
    fn future_sessions_are_outside_trailing_windows() {
        let store = SessionStore::in_memory().unwrap();
        store.save(&session("a", "2025-06-15T08:00:00", 60.0)).unwrap();
        store.save(&session("a", "2025-06-20T08:00:00", 60.0)).unwrap();
        store.save(&session("a", "2025-06-16T00:00:00", 60.0)).unwrap();

        let today = day("2025-06-15");
        let dates: Vec<NaiveDate> = store
            .daily_stats_as_of(today, 0)
            .unwrap()
            .iter()
            .map(|d| d.date)
            .collect();
        assert_eq!(dates, vec![today]);
        assert_eq!(store.daily_stats_as_of(today, 30).unwrap().len(), 1);

        let st = store.timer_stats_as_of(today, "a", 30).unwrap().unwrap();
        assert_eq!(st.total_sessions, 1);
    }

    #[test]
    fn timer_stats_respects_window_and_name() {
        let store = SessionStore::in_memory().unwrap();
        store.save(&session("a", "2025-03-01T08:00:00", 60.0)).unwrap();
        store.save(&session("a", "2025-03-01T09:00:00", 20.0)).unwrap();
        store.save(&session("a", "2025-01-01T09:00:00", 500.0)).unwrap();
        store.save(&session("b", "2025-03-01T09:00:00", 5.0)).unwrap();

        let st = store.timer_stats_as_of(day("2025-03-02"), "a", 30).unwrap().unwrap();
        assert_eq!(st.total_sessions, 2);
        assert_eq!(st.total_time, 80.0);
        assert_eq!(st.max_duration, 60.0);
        assert_eq!(st.active_days, 1);

        assert!(store.timer_stats_as_of(day("2025-03-02"), "zzz", 30).unwrap().is_none());
    }

    #[test]
    fn empty_store_yields_empty_results() {
        let store = SessionStore::in_memory().unwrap();
        assert!(store.daily_stats(30).unwrap().is_empty());
        assert!(store.timer_stats("x", 30).unwrap().is_none());
        assert!(store.recent(10).unwrap().is_empty());
        assert!(store.date_range().unwrap().is_none());
        assert_eq!(store.session_count().unwrap(), 0);
    }

    #[test]
    fn failed_save_leaves_log_unchanged() {
        let store = SessionStore::in_memory().unwrap();
        store.save(&session("ok", "2025-03-01T08:00:00", 1.0)).unwrap();

        // violates CHECK(duration >= 0)
        let err = store.save(&session("bad", "2025-03-01T09:00:00", -5.0)).unwrap_err();
        assert!(err.is_storage());

        let err = store
            .save_all(&[
                session("x", "2025-03-01T10:00:00", 1.0),
                session("y", "2025-03-01T11:00:00", -1.0),
            ])
            .unwrap_err();
        assert!(err.is_storage());

        assert_eq!(store.session_count().unwrap(), 1);
    }

    #[test]
    fn date_range_and_names() {
        let store = SessionStore::in_memory().unwrap();
        store.save(&session("write", "2025-03-05T08:00:00", 1.0)).unwrap();
        store.save(&session("read", "2025-01-02T08:00:00", 1.0)).unwrap();
        store.save(&session("write", "2025-02-01T08:00:00", 1.0)).unwrap();

        assert_eq!(
            store.date_range().unwrap(),
            Some((day("2025-01-02"), day("2025-03-05")))
        );
        assert_eq!(store.timer_names().unwrap(), vec!["read", "write"]);
        assert_eq!(store.integrity_check().unwrap(), "ok");
    }

    #[test]
    fn export_document_bounds_sessions() {
        let store = SessionStore::in_memory().unwrap();
        for i in 0..5 {
            store
                .save(&session(&format!("t{i}"), "2025-03-01T08:00:00", 10.0))
                .unwrap();
        }
        let now = parse_datetime("2025-03-01T20:00:00").unwrap();
        let doc = store.export_document(3, now).unwrap();
        assert_eq!(doc.sessions.len(), 3);
        assert_eq!(doc.sessions[0].timer_name, "t4");
        assert_eq!(doc.daily_stats.len(), 1);
        assert_eq!(doc.daily_stats[0].session_count, 5);
        assert_eq!(doc.export_date, now);
    }
}
