use crate::db::store::SessionStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::format_time;
use std::fs;

pub fn print_db_info(store: &SessionStore, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL SESSIONS
    //
    let count = store.session_count()?;
    println!(
        "{}• Total sessions:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let names = store.timer_names()?;
    println!("{}• Timers:{} {}", CYAN, RESET, names.len());

    //
    // 3) DATE RANGE
    //
    let range = store.date_range()?;
    let (fmt_first, fmt_last) = match range {
        Some((f, l)) => (f.to_string(), l.to_string()),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE TIME/DAY
    //
    if let Some((f, l)) = range {
        let days = (l - f).num_days() + 1;
        let total: f64 = store
            .daily_stats_as_of(l, days.max(0) as u32)?
            .iter()
            .map(|d| d.total_time)
            .sum();
        println!(
            "{}• Average tracked/day:{} {}",
            CYAN,
            RESET,
            format_time(total / days as f64)
        );
    }

    println!();
    Ok(())
}
