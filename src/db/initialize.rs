use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the single flat schema if missing. Idempotent.
///
/// `sessions` is append-only; rows are never updated or deleted.
/// `log` is the internal audit trail written by `db::log::ttlog`.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            timer_name  TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            duration    REAL NOT NULL CHECK(duration >= 0),
            laps        TEXT NOT NULL DEFAULT '[]',
            notes       TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);
        CREATE INDEX IF NOT EXISTS idx_sessions_timer_name ON sessions(timer_name);

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
