use crate::errors::{AppError, AppResult};
use crate::models::session::{Session, parse_datetime};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SESSION_COLUMNS: &str = "timer_name, start_time, end_time, duration, laps, notes";

/// Insert one session row. Laps are serialized before touching the database,
/// so a serialization failure never leaves a partial row behind.
pub fn insert_session(conn: &Connection, s: &Session, created_at: &str) -> AppResult<i64> {
    let laps = serde_json::to_string(&s.laps)?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO sessions (timer_name, start_time, end_time, duration, laps, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    stmt.execute(params![
        s.timer_name,
        s.start_str(),
        s.end_str(),
        s.duration,
        laps,
        s.notes,
        created_at,
    ])?;

    Ok(conn.last_insert_rowid())
}

fn conversion_failure(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn get_datetime(row: &Row, col: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    parse_datetime(&raw).ok_or_else(|| conversion_failure(col, AppError::InvalidDate(raw)))
}

/// Mapping DB → Session (column order of `SESSION_COLUMNS`).
pub fn map_row(row: &Row) -> rusqlite::Result<Session> {
    let end_time = match row.get::<_, Option<String>>(2)? {
        Some(raw) => Some(
            parse_datetime(&raw).ok_or_else(|| conversion_failure(2, AppError::InvalidDate(raw)))?,
        ),
        None => None,
    };

    let laps_raw: String = row.get(4)?;
    let laps: Vec<f64> =
        serde_json::from_str(&laps_raw).map_err(|e| conversion_failure(4, AppError::LapData(e)))?;

    Ok(Session {
        timer_name: row.get(0)?,
        start_time: get_datetime(row, 1)?,
        end_time,
        duration: row.get(3)?,
        laps,
        notes: row.get(5)?,
    })
}

/// Most recently saved sessions first (insertion order, not `start_time`).
pub fn load_recent(conn: &Connection, limit: usize) -> AppResult<Vec<Session>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY id DESC LIMIT ?1"
    ))?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map([limit], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sessions whose calendar day lies in `since..until` (`until` exclusive),
/// in insertion order. Optionally restricted to one timer name.
pub fn load_window(
    conn: &Connection,
    since: NaiveDate,
    until: NaiveDate,
    timer_name: Option<&str>,
) -> AppResult<Vec<Session>> {
    // "YYYY-MM-DD" sorts before every "YYYY-MM-DDTHH:..." of the same day
    let since_str = since.format("%Y-%m-%d").to_string();
    let until_str = until.format("%Y-%m-%d").to_string();

    let mut out = Vec::new();
    match timer_name {
        None => {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 WHERE start_time >= ?1 AND start_time < ?2
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![since_str, until_str], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(name) => {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 WHERE timer_name = ?1 AND start_time >= ?2 AND start_time < ?3
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![name, since_str, until_str], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn load_timer_names(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt =
        conn.prepare_cached("SELECT DISTINCT timer_name FROM sessions ORDER BY timer_name ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_sessions(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?)
}

/// Earliest and latest session day, if any session exists.
pub fn date_range(conn: &Connection) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let bounds: Option<(Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT MIN(start_time), MAX(start_time) FROM sessions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((Some(first), Some(last))) = bounds else {
        return Ok(None);
    };

    match (parse_datetime(&first), parse_datetime(&last)) {
        (Some(f), Some(l)) => Ok(Some((f.date(), l.date()))),
        _ => Err(AppError::InvalidDate(format!("{first} / {last}"))),
    }
}
