pub mod game_metrics;

pub use game_metrics::{GameMetrics, HighScore, LEADERBOARD_SIZE};
