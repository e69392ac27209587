use crate::db::SessionStore;
use crate::db::log::LogEntry;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_TARGET_MAX: usize = 60;

fn ansi_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()).as_ref()
}

fn strip_ansi(s: &str) -> String {
    match ansi_regex() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// ANSI colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "export" => Colour::Blue,
        "import" => Colour::Yellow,
        "vacuum" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated to 60 visible characters.
/// Only the operation word keeps its colour.
fn render_op_target(entry: &LogEntry) -> String {
    let color = color_for_operation(&entry.operation);

    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let truncated = if visible.chars().count() > OP_TARGET_MAX {
        let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &SessionStore) -> AppResult<()> {
        let entries = store.log_entries()?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }

    /// One formatted line per entry, columns aligned on visible width.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let rows: Vec<(String, String, String, &str)> = entries
            .iter()
            .map(|e| {
                (
                    e.id.to_string(),
                    display_date(&e.date),
                    render_op_target(e),
                    e.message.as_str(),
                )
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| strip_ansi(&r.2).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);

        let mut out = vec!["📜 Internal log:".to_string(), String::new()];
        for (id, date, op_target, message) in rows {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));
            out.push(format!(
                "{id:>id_w$}: {date:<date_w$} | {op_target}{padding} => {message}"
            ));
        }
        out
    }
}
