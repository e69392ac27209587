use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::run::RunLogic;
use crate::db::SessionStore;
use crate::errors::AppResult;
use std::io::{self, BufRead};

/// Handle the `run` command: stopwatches driven by stdin lines.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run { names } = cmd {
        let store = SessionStore::open(&cfg.database)?;
        let mut board = RunLogic::board(&cfg.default_timer_name, names);

        println!("⏱️  Thymer: type 'help' for commands, empty line toggles the selected timer.");
        let stdin = io::stdin();
        RunLogic::run_lines(&mut board, &store, stdin.lock().lines())?;
    }
    Ok(())
}
