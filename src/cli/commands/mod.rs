pub mod add;
pub mod config;
pub mod db;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod recent;
pub mod run;
pub mod stats;
