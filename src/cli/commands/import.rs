use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let store = SessionStore::open(&cfg.database)?;
        let n = ExportLogic::import(&store, file)?;
        success(format!("Imported {n} session(s) from {file}"));
    }
    Ok(())
}
