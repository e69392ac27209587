// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{ExportDocument, SessionCsvRow, notify_export_success};
use crate::ui::messages::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

fn export_err(path: &Path, what: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Export(format!("{what} {}: {e}", path.display()))
}

/// Export JSON pretty-printed.
///
/// The document is written to a sibling temp file and renamed into place,
/// so a failed export never leaves a truncated file at `path`.
pub fn export_json(doc: &ExportDocument, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(doc)
        .map_err(|e| export_err(path, "JSON serialization failed for", e))?;

    let tmp = path.with_extension("json.tmp");
    let write = || -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(json_data.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    };

    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(export_err(path, "cannot write", e));
    }

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV (header included thanks to serde).
pub fn export_csv(rows: &[SessionCsvRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(|e| export_err(path, "cannot open", e))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| export_err(path, "CSV write error on", e))?;
    }

    wtr.flush()
        .map_err(|e| export_err(path, "CSV flush error on", e))?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Read back a JSON export produced by `export_json`.
pub fn read_json(path: &Path) -> AppResult<ExportDocument> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Import(format!("cannot read {}: {e}", path.display())))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::Import(format!("invalid export file {}: {e}", path.display())))
}
