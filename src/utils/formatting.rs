//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Left-align `s` in a column of `width` terminal cells.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Right-align `s` in a column of `width` terminal cells.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// Cut `s` to at most `max` terminal cells, ending with "…" when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// "1 day" / "3 days".
pub fn plural_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        // wide CJK glyphs take two cells
        assert_eq!(pad_right("日本", 6), "日本  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("deep work session", 8), "deep wo…");
    }

    #[test]
    fn pluralizes_days() {
        assert_eq!(plural_days(1), "1 day");
        assert_eq!(plural_days(0), "0 days");
        assert_eq!(plural_days(12), "12 days");
    }
}
