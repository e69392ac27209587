pub mod add;
pub mod board;
pub mod config;
pub mod export;
pub mod log;
pub mod run;
pub mod stats;
pub mod timer;

pub use board::TimerBoard;
pub use stats::StatsEngine;
pub use timer::{Lap, Timer};
