//! Line-oriented driver for a `TimerBoard`.
//!
//! Each input line is one command. Saving follows the board contract: a
//! Session is persisted before a timer is reset, and a failed save keeps
//! the timer intact.

use crate::core::board::TimerBoard;
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use crate::utils::colors::{RESET, color_for_running};
use crate::utils::format_time;
use crate::utils::table::{Column, Table};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunCommand {
    Start,
    Pause,
    Toggle,
    Lap,
    Reset,
    New(Option<String>),
    Delete,
    Next,
    Prev,
    /// 1-based index as typed by the user.
    Select(usize),
    Status,
    Help,
    Quit,
}

impl RunCommand {
    /// An empty line toggles the selected timer.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "" | "toggle" | "t" => Self::Toggle,
            "start" | "s" => Self::Start,
            "pause" | "p" => Self::Pause,
            "lap" | "l" => Self::Lap,
            "reset" | "r" => Self::Reset,
            "new" | "n" => Self::New((!rest.is_empty()).then(|| rest.to_string())),
            "del" | "d" => Self::Delete,
            "next" => Self::Next,
            "prev" => Self::Prev,
            "select" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| format!("invalid timer number '{rest}'"))?;
                Self::Select(n)
            }
            "status" | "ls" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (type 'help')")),
        };
        Ok(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct RunLogic;

impl RunLogic {
    pub fn board(base_name: &str, names: &[String]) -> TimerBoard {
        let mut board = TimerBoard::new(base_name);
        let mut names = names.iter();
        if let Some(first) = names.next()
            && !first.trim().is_empty()
        {
            board.selected_mut().rename(first.trim());
        }
        for name in names {
            board.add(Some(name));
        }
        board.select(0);
        board
    }

    /// Apply one command. Save failures are reported and do not stop the driver.
    pub fn execute(board: &mut TimerBoard, store: &SessionStore, cmd: RunCommand) -> Flow {
        let now = Instant::now();

        match cmd {
            RunCommand::Start => board.selected_mut().start_at(now),
            RunCommand::Pause => board.selected_mut().pause_at(now),
            RunCommand::Toggle => board.selected_mut().toggle_at(now),
            RunCommand::Lap => {
                if board.lap_selected_at(now) {
                    let timer = board.selected();
                    if let Some(lap) = timer.laps().last() {
                        info(format!(
                            "Lap {} of '{}': {}",
                            timer.laps().len(),
                            timer.name(),
                            format_time(lap.duration.as_secs_f64())
                        ));
                    }
                } else {
                    warning("Nothing to lap yet: start the timer first");
                }
                return Flow::Continue;
            }
            RunCommand::Reset => {
                let name = board.selected().name().to_string();
                let elapsed = board.selected().elapsed_at(now).as_secs_f64();
                match board.reset_selected_at(store, now) {
                    Ok(Some(_)) => {
                        audit_save(store, &name, elapsed);
                        success(format!("Saved {} for '{name}'", format_time(elapsed)));
                    }
                    Ok(None) => info(format!("'{name}' had no time to save")),
                    Err(e) => error(format!("Session not saved, timer kept: {e}")),
                }
            }
            RunCommand::New(name) => {
                let created = board.add(name.as_deref()).name().to_string();
                info(format!("Created '{created}'"));
            }
            RunCommand::Delete => match board.remove_selected() {
                Some(t) => warning(format!("Removed '{}' (unsaved time discarded)", t.name())),
                None => warning("Cannot remove the last timer"),
            },
            RunCommand::Next => board.select_next(),
            RunCommand::Prev => board.select_prev(),
            RunCommand::Select(n) => {
                if n == 0 || !board.select(n - 1) {
                    warning(format!("No timer #{n}"));
                }
            }
            RunCommand::Status => {}
            RunCommand::Help => {
                print_help();
                return Flow::Continue;
            }
            RunCommand::Quit => {
                Self::quit(board, store, now);
                return Flow::Quit;
            }
        }

        print_status(board, now);
        Flow::Continue
    }

    /// Save every timer that has time on it.
    pub fn quit(board: &mut TimerBoard, store: &SessionStore, now: Instant) {
        let pending: Vec<(String, f64)> = board
            .timers()
            .iter()
            .map(|t| (t.name().to_string(), t.elapsed_at(now).as_secs_f64()))
            .filter(|(_, e)| *e > 0.0)
            .collect();

        match board.flush_at(store, now) {
            Ok(saved) => {
                for (name, elapsed) in pending.iter().take(saved) {
                    audit_save(store, name, *elapsed);
                }
                if saved > 0 {
                    success(format!("Saved {saved} session(s)"));
                }
            }
            Err(e) => error(format!("Could not save all sessions: {e}")),
        }
    }

    /// Drive the board from `lines` until `quit` or end of input.
    pub fn run_lines<I>(board: &mut TimerBoard, store: &SessionStore, lines: I) -> AppResult<()>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
    {
        print_status(board, Instant::now());
        for line in lines {
            let line = line?;
            match RunCommand::parse(&line) {
                Ok(cmd) => {
                    if Self::execute(board, store, cmd) == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(msg) => warning(msg),
            }
        }
        Self::quit(board, store, Instant::now());
        Ok(())
    }
}

fn audit_save(store: &SessionStore, timer: &str, elapsed: f64) {
    if let Err(e) = store.log("save", timer, &format!("session of {}", format_time(elapsed))) {
        warning(format!("Failed to write internal log: {e}"));
    }
}

fn print_status(board: &TimerBoard, now: Instant) {
    let mut table = Table::new(vec![
        Column::left(" "),
        Column::right("#"),
        Column::left("Timer"),
        Column::right("Elapsed"),
        Column::right("Laps"),
        Column::left("State"),
    ]);

    for (i, t) in board.timers().iter().enumerate() {
        let running = t.is_running();
        table.add_row(vec![
            (if i == board.selected_index() { ">" } else { "" }).to_string(),
            (i + 1).to_string(),
            t.name().to_string(),
            format_time(t.elapsed_at(now).as_secs_f64()),
            t.laps().len().to_string(),
            format!(
                "{}{}{}",
                color_for_running(running),
                if running { "running" } else { "paused" },
                RESET
            ),
        ]);
    }

    println!("{}", table.render());
}

fn print_help() {
    println!(
        "Commands:
  start | pause | toggle (or empty line)
  lap               record a split on the selected timer
  reset             save the selected timer's session, then clear it
  new [name]        create a timer and select it
  del               remove the selected timer (unsaved time is lost)
  next | prev       move the selection
  select <n>        select timer #n
  status            show all timers
  quit              save every timer with time on it and exit"
    );
}
