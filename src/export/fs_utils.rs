// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::ui::messages::{info, warning};
use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::path::Path;

/// Check whether a file can be created or overwritten.
///
/// - File does NOT exist → Ok
/// - File exists and `force` → Ok
/// - File exists and `force == false` → ask the user for confirmation.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}

/// `thymer_export_YYYYMMDD_HHMMSS.<ext>`
pub fn default_file_name(format: ExportFormat, now: NaiveDateTime) -> String {
    format!(
        "thymer_export_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.as_str()
    )
}
