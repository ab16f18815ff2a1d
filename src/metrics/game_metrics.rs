use std::time::{Duration, Instant};

/// Entries kept on the in-memory leaderboard
pub const LEADERBOARD_SIZE: usize = 5;

const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub name: String,
    pub score: usize,
}

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Whether a run is in progress; the timer is frozen otherwise
    pub running: bool,
    pub high_score: usize,
    pub games_played: u32,
    /// Score of the most recently finished run
    pub last_score: Option<usize>,
    /// Best runs of the session, highest first
    pub leaderboard: Vec<HighScore>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            running: true,
            high_score: 0,
            games_played: 0,
            last_score: None,
            leaderboard: Vec::with_capacity(LEADERBOARD_SIZE + 1),
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: usize) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.last_score = Some(final_score);
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Put the last finished run on the leaderboard under `name`
    ///
    /// Returns the rank (0-based) if the run made it onto the board.
    pub fn record_name(&mut self, name: &str) -> Option<usize> {
        let score = self.last_score.take()?;
        let name = if name.is_empty() { ANONYMOUS } else { name };

        // Equal scores keep their arrival order
        let rank = self
            .leaderboard
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.leaderboard.len());
        if rank >= LEADERBOARD_SIZE {
            return None;
        }

        self.leaderboard.insert(
            rank,
            HighScore {
                name: name.to_string(),
                score,
            },
        );
        self.leaderboard.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(metrics: &mut GameMetrics, name: &str, score: usize) -> Option<usize> {
        metrics.on_game_over(score);
        metrics.record_name(name)
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_leaderboard_sorted_and_capped() {
        let mut metrics = GameMetrics::new();
        for (name, score) in [("a", 20), ("b", 45), ("c", 10), ("d", 30), ("e", 15), ("f", 25)] {
            finish(&mut metrics, name, score);
        }

        let scores: Vec<usize> = metrics.leaderboard.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![45, 30, 25, 20, 15]);
        assert_eq!(metrics.leaderboard[0].name, "b");
    }

    #[test]
    fn test_low_score_misses_full_board() {
        let mut metrics = GameMetrics::new();
        for score in [50, 40, 30, 20, 15] {
            finish(&mut metrics, "x", score);
        }
        assert_eq!(finish(&mut metrics, "late", 10), None);
        assert_eq!(metrics.leaderboard.len(), LEADERBOARD_SIZE);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut metrics = GameMetrics::new();
        finish(&mut metrics, "first", 20);
        assert_eq!(finish(&mut metrics, "second", 20), Some(1));
        assert_eq!(metrics.leaderboard[0].name, "first");
    }

    #[test]
    fn test_empty_name_is_anonymous() {
        let mut metrics = GameMetrics::new();
        assert_eq!(finish(&mut metrics, "", 12), Some(0));
        assert_eq!(metrics.leaderboard[0].name, "anonymous");
    }

    #[test]
    fn test_record_without_finished_run() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.record_name("ghost"), None);

        finish(&mut metrics, "once", 11);
        assert_eq!(metrics.record_name("twice"), None);
        assert_eq!(metrics.leaderboard.len(), 1);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_timer_frozen_after_game_over() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_game_over(10);
        let frozen = metrics.elapsed_time;
        assert!(frozen.as_millis() >= 20);

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_game_start();
        assert!(metrics.running);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
