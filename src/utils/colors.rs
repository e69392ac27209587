/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Streak color:
/// \>=7 days → green
/// \>=3 days → yellow
/// otherwise → red
pub fn color_for_streak(current: u32) -> &'static str {
    if current >= 7 {
        GREEN
    } else if current >= 3 {
        YELLOW
    } else {
        RED
    }
}

/// Weekly activity color: five or more active days is on track.
pub fn color_for_active_days(active: u32) -> &'static str {
    if active >= 5 { GREEN } else { YELLOW }
}

/// Running timers are green, paused ones yellow.
pub fn color_for_running(running: bool) -> &'static str {
    if running { GREEN } else { YELLOW }
}

/// Returns GREY for empty or zero-like values, the value untouched otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "00:00:00.00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
