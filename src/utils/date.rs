use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Timezone-naive "today": the local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Timezone-naive "now" in local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Calendar-correct `date - n days` (rolls over month and year boundaries).
pub fn days_before(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(n as u64))
        .unwrap_or(NaiveDate::MIN)
}

/// The previous calendar day.
pub fn yesterday_of(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(NaiveDate::MIN)
}

/// The next calendar day; exclusive upper bound of a trailing window.
pub fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// First day of a trailing window of `days` days relative to `today`.
///
/// The window is inclusive on both ends: `days = 0` covers only `today`,
/// `days = 7` covers today plus the seven days before it.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    days_before(today, days)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
