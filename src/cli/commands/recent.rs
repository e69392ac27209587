use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::models::Session;
use crate::ui::messages::info;
use crate::utils::colors::colorize_optional;
use crate::utils::format_time;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};

const NOTES_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Recent { limit } = cmd {
        let store = SessionStore::open(&cfg.database)?;
        let sessions = store.recent(limit.unwrap_or(cfg.recent_limit))?;

        if sessions.is_empty() {
            info("No sessions recorded yet.");
            return Ok(());
        }

        println!("{}", render(&sessions));
    }
    Ok(())
}

fn render(sessions: &[Session]) -> String {
    let mut table = Table::new(vec![
        Column::left("Started"),
        Column::left("Timer"),
        Column::right("Duration"),
        Column::right("Laps"),
        Column::left("Notes"),
    ]);

    for s in sessions {
        table.add_row(vec![
            s.start_time.format("%Y-%m-%d %H:%M").to_string(),
            s.timer_name.clone(),
            format_time(s.duration),
            s.laps.len().to_string(),
            colorize_optional(&truncate(s.notes.as_deref().unwrap_or("--"), NOTES_WIDTH)),
        ]);
    }

    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_datetime;

    #[test]
    fn one_line_per_session_plus_header() {
        let sessions = vec![
            Session::new("focus", parse_datetime("2025-06-01T09:00:00").unwrap(), 61.5)
                .with_notes(Some("draft".into())),
            Session::new("read", parse_datetime("2025-06-01T10:00:00").unwrap(), 5.0),
        ];
        let out = render(&sessions);
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("2025-06-01 09:00"));
        assert!(out.contains("00:01:01.50"));
        assert!(out.contains("draft"));
    }
}
