use crate::config::Config;
use crate::db::SessionStore;
use crate::errors::AppResult;
use crate::export::{ExportFormat, default_file_name, ensure_writable};
use crate::ui::messages::{info, warning};
use crate::utils::date;
use crate::utils::path::expand_tilde;
use chrono::NaiveDateTime;
use std::path::PathBuf;

pub struct ExportLogic;

impl ExportLogic {
    /// Target path for an export.
    ///
    /// An explicit `file` wins (with `~` expanded); otherwise a timestamped
    /// name is placed in `cfg.export_dir`, or the current directory.
    pub fn resolve_path(
        cfg: &Config,
        format: ExportFormat,
        file: Option<&str>,
        now: NaiveDateTime,
    ) -> PathBuf {
        if let Some(f) = file {
            return expand_tilde(f);
        }
        let name = default_file_name(format, now);
        match &cfg.export_dir {
            Some(dir) => expand_tilde(dir).join(name),
            None => PathBuf::from(name),
        }
    }

    /// Write the export and record it in the audit log. Returns the path written.
    pub fn export(
        store: &SessionStore,
        cfg: &Config,
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = Self::resolve_path(cfg, format, file, date::now());
        ensure_writable(&path, force)?;

        let summary = match format {
            ExportFormat::Json => {
                let doc = store.export_with_limit(&path, cfg.export_session_limit)?;
                format!(
                    "{} sessions, {} days of stats",
                    doc.sessions.len(),
                    doc.daily_stats.len()
                )
            }
            ExportFormat::Csv => {
                let n = store.export_csv(&path, cfg.export_session_limit)?;
                format!("{n} sessions")
            }
        };

        info(&summary);

        if let Err(e) = store.log("export", &path.display().to_string(), &summary) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(path)
    }

    /// Append the sessions of a JSON export. Returns how many were imported.
    pub fn import(store: &SessionStore, file: &str) -> AppResult<usize> {
        let path = expand_tilde(file);
        let n = store.import(&path)?;

        if let Err(e) = store.log(
            "import",
            &path.display().to_string(),
            &format!("{n} sessions imported"),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_datetime;

    #[test]
    fn explicit_file_wins_over_export_dir() {
        let cfg = Config {
            export_dir: Some("/var/exports".into()),
            ..Config::default()
        };
        let now = parse_datetime("2025-09-01T14:03:09").unwrap();
        assert_eq!(
            ExportLogic::resolve_path(&cfg, ExportFormat::Json, Some("/tmp/out.json"), now),
            PathBuf::from("/tmp/out.json")
        );
        assert_eq!(
            ExportLogic::resolve_path(&cfg, ExportFormat::Csv, None, now),
            PathBuf::from("/var/exports/thymer_export_20250901_140309.csv")
        );
    }

    #[test]
    fn default_name_lands_in_current_dir() {
        let cfg = Config {
            export_dir: None,
            ..Config::default()
        };
        let now = parse_datetime("2025-09-01T14:03:09").unwrap();
        assert_eq!(
            ExportLogic::resolve_path(&cfg, ExportFormat::Json, None, now),
            PathBuf::from("thymer_export_20250901_140309.json")
        );
    }

    #[test]
    fn export_then_import_is_logged() {
        let store = SessionStore::in_memory().unwrap();
        store
            .save(&crate::models::Session::new(
                "focus",
                parse_datetime("2025-09-01T09:00:00").unwrap(),
                120.0,
            ))
            .unwrap();

        let path = std::env::temp_dir().join("thymer_core_export_logged.json");
        let _ = std::fs::remove_file(&path);
        let cfg = Config::default();
        ExportLogic::export(
            &store,
            &cfg,
            ExportFormat::Json,
            Some(path.to_str().unwrap()),
            true,
        )
        .unwrap();

        let other = SessionStore::in_memory().unwrap();
        assert_eq!(ExportLogic::import(&other, path.to_str().unwrap()).unwrap(), 1);

        let ops: Vec<String> = store.log_entries().unwrap().into_iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec!["export"]);
        assert_eq!(other.log_entries().unwrap()[0].operation, "import");
        let _ = std::fs::remove_file(&path);
    }
}
