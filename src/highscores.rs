//! High score leaderboard system
//!
//! Persisted as JSON, tracks top 10 scores.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default leaderboard file name
pub const HIGHSCORES_FILE: &str = "air-evade-highscores.json";

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u32,
    /// Difficulty tier reached
    pub difficulty: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, score: u32, difficulty: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from `path`, starting fresh on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("High score file unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to `path`; failures are logged, not fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Failed to save high scores: {err}");
                } else {
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("Failed to serialize high scores: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_scores_insert_in_rank_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 4, 1000), Some(1));
        assert_eq!(scores.add_score(75, 5, 1001), Some(1));
        assert_eq!(scores.add_score(60, 4, 1002), Some(2));

        let ranked: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![75, 60, 50]);
        assert_eq!(scores.top_score(), Some(75));
    }

    #[test]
    fn test_leaderboard_truncates_to_max() {
        let mut scores = HighScores::new();
        for i in 1..=15u32 {
            scores.add_score(i, 1, 1000 + i as u64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // Lowest survivors are the top ten
        assert_eq!(scores.entries.last().unwrap().score, 6);
        assert!(!scores.qualifies(5));
        assert!(scores.qualifies(16));
    }

    #[test]
    fn test_potential_rank_matches_insertion() {
        let mut scores = HighScores::new();
        scores.add_score(30, 2, 1000);
        scores.add_score(20, 2, 1001);

        assert_eq!(scores.potential_rank(25), Some(2));
        assert_eq!(scores.add_score(25, 2, 1002), Some(2));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = std::env::temp_dir().join("air-evade-highscores-test.json");
        let mut scores = HighScores::new();
        scores.add_score(42, 3, 12345);

        scores.save(&path);
        let reloaded = HighScores::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(reloaded.entries.len(), 1);
        assert_eq!(reloaded.entries[0].score, 42);
        assert_eq!(reloaded.entries[0].difficulty, 3);
    }
}
