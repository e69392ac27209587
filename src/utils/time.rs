//! Time utilities: elapsed-time formatting, duration parsing, HH:MM parsing.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Render elapsed seconds as `HH:MM:SS.ss`.
///
/// The value is rounded to hundredths first so that e.g. `59.999` carries
/// into the next minute instead of printing `60.00` seconds.
/// Hours are zero-padded to two digits but never truncated.
pub fn format_time(seconds: f64) -> String {
    let centis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 100.0).round() as u64
    } else {
        0
    };

    let hours = centis / 360_000;
    let minutes = (centis / 6_000) % 60;
    let secs = (centis / 100) % 60;
    let hundredths = centis % 100;

    format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, secs, hundredths)
}

/// Parse a human duration into seconds.
///
/// Accepted forms:
/// - `3725.5`            → plain seconds
/// - `90s`, `45m`, `2h`  → single unit
/// - `1h30m`, `1h2m5.5s` → combined units (in h/m/s order)
/// - `01:02:05.5`        → HH:MM:SS(.ss)
/// - `02:05`             → MM:SS
pub fn parse_duration(input: &str) -> AppResult<f64> {
    let s = input.trim().to_ascii_lowercase();
    let invalid = || AppError::InvalidDuration(input.to_string());

    if s.is_empty() {
        return Err(invalid());
    }

    if let Ok(v) = s.parse::<f64>() {
        return if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(invalid())
        };
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let (h, m, sec) = match parts.as_slice() {
            [h, m, sec] => (*h, *m, *sec),
            [m, sec] => ("0", *m, *sec),
            _ => return Err(invalid()),
        };
        let h: u64 = h.parse().map_err(|_| invalid())?;
        let m: u64 = m.parse().map_err(|_| invalid())?;
        let sec: f64 = sec.parse().map_err(|_| invalid())?;
        if m >= 60 || !(0.0..60.0).contains(&sec) {
            return Err(invalid());
        }
        return Ok(h as f64 * 3600.0 + m as f64 * 60.0 + sec);
    }

    let mut total = 0.0;
    let mut number = String::new();
    let mut last_rank = 0;
    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let (rank, factor) = match c {
            'h' => (1, 3600.0),
            'm' => (2, 60.0),
            's' => (3, 1.0),
            _ => return Err(invalid()),
        };
        if number.is_empty() || rank <= last_rank {
            return Err(invalid());
        }
        let v: f64 = number.parse().map_err(|_| invalid())?;
        total += v * factor;
        number.clear();
        last_rank = rank;
    }

    if !number.is_empty() {
        return Err(invalid());
    }

    Ok(total)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_time(3725.5), "01:02:05.50");
        assert_eq!(format_time(0.0), "00:00:00.00");
        assert_eq!(format_time(59.994), "00:00:59.99");
        assert_eq!(format_time(59.999), "00:01:00.00");
        assert_eq!(format_time(360_000.0), "100:00:00.00");
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(format_time(-3.0), "00:00:00.00");
        assert_eq!(format_time(f64::NAN), "00:00:00.00");
    }

    #[test]
    fn parses_duration_forms() {
        assert_eq!(parse_duration("3725.5").unwrap(), 3725.5);
        assert_eq!(parse_duration("90s").unwrap(), 90.0);
        assert_eq!(parse_duration("45m").unwrap(), 2700.0);
        assert_eq!(parse_duration("1h30m").unwrap(), 5400.0);
        assert_eq!(parse_duration("1h2m5.5s").unwrap(), 3725.5);
        assert_eq!(parse_duration("01:02:05.5").unwrap(), 3725.5);
        assert_eq!(parse_duration("02:05").unwrap(), 125.0);
    }

    #[test]
    fn rejects_malformed_durations() {
        for bad in ["", "abc", "1x", "30m1h", "h", "1:99:00", "-5", "5m3"] {
            assert!(parse_duration(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parses_optional_clock_time() {
        let t = parse_optional_time(Some(&"09:30".to_string())).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(9, 30, 0));
        assert!(parse_optional_time(Some(&"9h".to_string())).is_err());
        assert!(parse_optional_time(None).unwrap().is_none());
    }
}
