use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// `$EDITOR`, then `$VISUAL`, then the platform default.
    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open the config file in `editor`, falling back to the default editor.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        if matches!(Command::new(&requested).arg(path).status(), Ok(s) if s.success()) {
            success(format!("Configuration file edited using '{requested}'"));
            return Ok(());
        }

        if requested == default_editor {
            return Err(AppError::Config(format!("editor '{requested}' failed")));
        }

        warning(format!(
            "Editor '{requested}' not available, falling back to '{default_editor}'"
        ));
        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{default_editor}'"));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit configuration file using '{default_editor}'"
            ))),
        }
    }
}
