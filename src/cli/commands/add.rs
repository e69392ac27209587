use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, ManualEntry};
use crate::db::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::format_time;
use crate::utils::time::{parse_duration, parse_optional_time};

/// Record a finished session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        timer,
        duration,
        date: day,
        at,
        laps,
        notes,
    } = cmd
    {
        //
        // 1. Parse inputs
        //
        let duration = parse_duration(duration)?;

        let day = match day {
            Some(d) => Some(date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?),
            None => None,
        };

        let at = parse_optional_time(at.as_ref())?;

        let laps = laps
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| parse_duration(l))
            .collect::<AppResult<Vec<f64>>>()?;

        //
        // 2. Build and save
        //
        let session = AddLogic::build_session(
            ManualEntry {
                timer: timer.clone(),
                duration,
                date: day,
                at,
                laps,
                notes: notes.clone(),
            },
            date::now(),
        )?;

        let store = SessionStore::open(&cfg.database)?;
        AddLogic::apply(&store, &session)?;

        success(format!(
            "Session saved: '{}' {} on {}",
            session.timer_name,
            format_time(session.duration),
            session.date()
        ));
    }
    Ok(())
}
