// src/export/model.rs

use crate::models::{DailyStats, Session};
use crate::utils::format_time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Structured export: sessions (most recent first), a daily-stats snapshot
/// and the moment the export was taken. Deserializable for `import`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportDocument {
    pub sessions: Vec<Session>,
    pub daily_stats: Vec<DailyStats>,
    pub export_date: NaiveDateTime,
}

/// Flat session row for CSV.
#[derive(Serialize, Clone, Debug)]
pub struct SessionCsvRow {
    pub timer_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: f64,
    pub duration_hms: String,
    pub lap_count: usize,
    pub laps: String,
    pub notes: String,
}

impl From<&Session> for SessionCsvRow {
    fn from(s: &Session) -> Self {
        Self {
            timer_name: s.timer_name.clone(),
            date: s.date().format("%Y-%m-%d").to_string(),
            start_time: s.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            end_time: s
                .end_time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            duration: s.duration,
            duration_hms: format_time(s.duration),
            lap_count: s.laps.len(),
            laps: s
                .laps
                .iter()
                .map(|l| format!("{l:.2}"))
                .collect::<Vec<_>>()
                .join(";"),
            notes: s.notes.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_datetime;

    #[test]
    fn csv_row_flattens_laps_and_times() {
        let s = Session::new("focus", parse_datetime("2025-09-01T09:00:00").unwrap(), 3725.5)
            .with_laps(vec![1000.0, 2725.5]);
        let row = SessionCsvRow::from(&s);

        assert_eq!(row.date, "2025-09-01");
        assert_eq!(row.duration_hms, "01:02:05.50");
        assert_eq!(row.lap_count, 2);
        assert_eq!(row.laps, "1000.00;2725.50");
        assert_eq!(row.end_time, "");
    }
}
