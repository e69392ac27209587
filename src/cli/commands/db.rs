use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::SessionStore;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
    } = cmd
    {
        let store = SessionStore::open(&cfg.database)?;

        //
        // 1) INFO
        //
        if *info {
            stats::print_db_info(&store, &cfg.database)?;
        }

        //
        // 2) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity = store.integrity_check()?;
            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 3) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.vacuum()?;
            if let Err(e) = store.log("vacuum", "", "Database optimized") {
                warning(format!("Failed to write internal log: {e}"));
            }
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        if !*info && !*check && !*vacuum {
            warning("Nothing to do: use --info, --check or --vacuum.");
        }
    }

    Ok(())
}
