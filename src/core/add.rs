use crate::db::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::ui::messages::warning;
use crate::utils::format_time;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Laps may exceed the total by rounding noise from user input.
const LAP_TOLERANCE: f64 = 0.005;

/// A finished session entered by hand.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub timer: String,
    pub duration: f64,
    pub date: Option<NaiveDate>,
    pub at: Option<NaiveTime>,
    pub laps: Vec<f64>,
    pub notes: Option<String>,
}

pub struct AddLogic;

impl AddLogic {
    /// Build the Session for a manual entry.
    ///
    /// With `--at` the session starts at that time on `date` (default: today).
    /// Without it the session ends at the current time of day on `date`.
    pub fn build_session(entry: ManualEntry, now: NaiveDateTime) -> AppResult<Session> {
        let name = entry.timer.trim();
        if name.is_empty() {
            return Err(AppError::Other("timer name must not be empty".into()));
        }

        let lapped: f64 = entry.laps.iter().sum();
        if lapped > entry.duration + LAP_TOLERANCE {
            return Err(AppError::InvalidDuration(format!(
                "laps add up to {} but the session lasts {}",
                format_time(lapped),
                format_time(entry.duration)
            )));
        }

        let out_of_range = || {
            AppError::InvalidDuration(format!(
                "{} does not fit in the calendar",
                format_time(entry.duration)
            ))
        };
        let span = Duration::try_milliseconds((entry.duration * 1000.0).round() as i64)
            .ok_or_else(out_of_range)?;
        let day = entry.date.unwrap_or(now.date());

        let (start, end) = match entry.at {
            Some(at) => {
                let start = day.and_time(at);
                let end = start.checked_add_signed(span).ok_or_else(out_of_range)?;
                (start, end)
            }
            None => {
                let end = day.and_time(now.time());
                let start = end.checked_sub_signed(span).ok_or_else(out_of_range)?;
                (start, end)
            }
        };

        Ok(Session::new(name, start, entry.duration)
            .with_end(end)
            .with_laps(entry.laps)
            .with_notes(entry.notes))
    }

    pub fn apply(store: &SessionStore, session: &Session) -> AppResult<i64> {
        let id = store.save(session)?;

        if let Err(e) = store.log(
            "save",
            &session.timer_name,
            &format!("manual session of {}", format_time(session.duration)),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(id)
    }
}
