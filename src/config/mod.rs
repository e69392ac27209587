use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, is_absolute};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "thymer.conf";
pub const DATABASE_FILE_NAME: &str = "thymer.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_timer_name")]
    pub default_timer_name: String,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_stats_days")]
    pub stats_days: u32,
    #[serde(default = "default_export_session_limit")]
    pub export_session_limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_timer_name() -> String {
    "Timer".to_string()
}
fn default_recent_limit() -> usize {
    10
}
fn default_stats_days() -> u32 {
    30
}
fn default_export_session_limit() -> usize {
    crate::export::DEFAULT_EXPORT_SESSIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_timer_name: default_timer_name(),
            recent_limit: default_recent_limit(),
            stats_days: default_stats_days(),
            export_session_limit: default_export_session_limit(),
            export_dir: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("thymer")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".thymer")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE_NAME)
    }

    /// Load the configuration file, or defaults when it does not exist.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve a database name given on the command line: absolute and `~/`
    /// paths are kept, bare names land in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        if is_absolute(name) || name.starts_with("~/") {
            expand_tilde(name)
        } else {
            Self::config_dir().join(name)
        }
    }

    /// Create the config directory and file. Returns the configured database path.
    ///
    /// With `is_test` the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => Self::resolve_database(name),
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Self::load().unwrap_or_default()
            };
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        Ok(db_path)
    }
}
