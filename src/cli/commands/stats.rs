use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::{STREAK_WINDOW_DAYS, StatsEngine};
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::models::{DailyStats, TimerStats};
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{RESET, color_for_active_days, color_for_streak};
use crate::utils::date;
use crate::utils::format_time;
use crate::utils::formatting::{bold, plural_days, truncate};
use crate::utils::table::{Column, Table};

/// Days listed under "Recent activity".
const ACTIVITY_DAYS: u32 = 6;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { days, timer } = cmd {
        let store = SessionStore::open(&cfg.database)?;
        let engine = StatsEngine::new(&store);
        let today = date::today();
        let days = days.unwrap_or(cfg.stats_days);

        //
        // Today
        //
        header("Today");
        match engine.daily_summary_as_of(today)? {
            Some(s) => println!(
                "{} in {} session(s): {}",
                bold(&format_time(s.total_time)),
                s.session_count,
                s.timer_names.join(", ")
            ),
            None => info("Nothing tracked today yet."),
        }

        //
        // Week
        //
        header("This week");
        let week = engine.weekly_summary_as_of(today)?;
        println!(
            "Active days: {}{}/{}{}   Total: {}   Sessions: {}   Avg/day: {}",
            color_for_active_days(week.active_days),
            week.active_days,
            week.window_days,
            RESET,
            format_time(week.total_time),
            week.session_count,
            format_time(week.average_per_day)
        );

        //
        // Streaks
        //
        header("Habit streak");
        let streak = engine.streak_data_as_of(today)?;
        println!(
            "Current: {}{}{}   Longest: {}   Active days (last {}): {}",
            color_for_streak(streak.current_streak),
            plural_days(streak.current_streak),
            RESET,
            plural_days(streak.longest_streak),
            STREAK_WINDOW_DAYS,
            streak.total_days
        );

        //
        // Timers
        //
        header(format!("Timers (last {})", plural_days(days)));
        let rows: Vec<TimerStats> = match timer {
            Some(name) => store.timer_stats_as_of(today, name, days)?.into_iter().collect(),
            None => engine.timer_table_as_of(today, days)?,
        };
        if rows.is_empty() {
            match timer {
                Some(name) => warning(format!("No sessions for '{name}' in this window.")),
                None => info("No sessions in this window."),
            }
        } else {
            println!("{}", render_timers(&rows));
        }

        //
        // Recent activity
        //
        header("Recent activity");
        let daily = store.daily_stats_as_of(today, ACTIVITY_DAYS)?;
        if daily.is_empty() {
            info("No activity in the last week.");
        } else {
            println!("{}", render_daily(&daily));
        }
    }
    Ok(())
}

fn render_timers(rows: &[TimerStats]) -> String {
    let mut table = Table::new(vec![
        Column::left("Timer"),
        Column::right("Sessions"),
        Column::right("Total"),
        Column::right("Average"),
        Column::right("Shortest"),
        Column::right("Longest"),
        Column::right("Days"),
    ]);

    for r in rows {
        table.add_row(vec![
            r.timer_name.clone(),
            r.total_sessions.to_string(),
            format_time(r.total_time),
            format_time(r.average_duration),
            format_time(r.min_duration),
            format_time(r.max_duration),
            r.active_days.to_string(),
        ]);
    }
    table.render()
}

fn render_daily(daily: &[DailyStats]) -> String {
    let mut table = Table::new(vec![
        Column::left("Date"),
        Column::right("Total"),
        Column::right("Sessions"),
        Column::right("Average"),
        Column::left("Timers"),
    ]);

    for d in daily {
        table.add_row(vec![
            d.date.format("%a %Y-%m-%d").to_string(),
            format_time(d.total_time),
            d.session_count.to_string(),
            format_time(d.average_session_duration),
            truncate(&d.timer_names.join(", "), 40),
        ]);
    }
    table.render()
}
