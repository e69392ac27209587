// src/export/mod.rs

mod fs_utils;
mod json_csv;
mod model;

pub use fs_utils::{default_file_name, ensure_writable};
pub use json_csv::{export_csv, export_json, read_json};
pub use model::{ExportDocument, SessionCsvRow};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Upper bound on sessions written into a JSON export.
pub const DEFAULT_EXPORT_SESSIONS: usize = 1000;

/// Daily-stats window (days) included in a JSON export.
pub const EXPORT_STATS_DAYS: u32 = 365;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}
