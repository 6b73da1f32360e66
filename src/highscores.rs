//! Best score and leaderboard records
//!
//! Tracks the best score with its stars, games played, and the top 10 runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::GameSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub stars: u8,
    /// Perfect-hit percentage
    pub precision: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Player records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HighScores {
    pub best_score: u64,
    pub best_stars: u8,
    pub games_played: u32,
    /// Sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Every run counts as played; best score and
    /// stars only change when the run beats the previous best.
    /// Returns the leaderboard rank achieved, if any.
    pub fn record(&mut self, summary: &GameSummary, timestamp: f64) -> Option<usize> {
        self.games_played += 1;
        if summary.score > self.best_score {
            log::info!("New best score {} (was {})", summary.score, self.best_score);
            self.best_score = summary.score;
            self.best_stars = summary.stars;
        }

        if !self.qualifies(summary.score) {
            return None;
        }
        let entry = HighScoreEntry {
            score: summary.score,
            stars: summary.stars,
            precision: summary.precision,
            timestamp,
        };
        let rank = match self.entries.iter().position(|e| summary.score > e.score) {
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

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load(path: &Path) -> Self {
        let scores: HighScores = persistence::load_json_or_default(path);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
