use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::SessionStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let store = SessionStore::open(&cfg.database)?;
        ExportLogic::export(&store, cfg, *format, file.as_deref(), *force)?;
    }
    Ok(())
}
