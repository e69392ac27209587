pub mod session;
pub mod stats;

pub use session::Session;
pub use stats::{DailyStats, DailySummary, StreakData, TimerStats, WeeklySummary};
