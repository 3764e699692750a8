//! Local leaderboard: periodic score snapshots ranked by coins.

use super::types::LeaderboardEntry;
use crate::core::constants::{DEFAULT_PLAYER_NAME, LEADERBOARD_CAPACITY};
use crate::economy::types::EconomySnapshot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    player_name: String,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Entries ordered by coins, highest first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Set the name used for future submissions. Blank names are ignored.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.player_name = trimmed.to_string();
        true
    }

    /// Record a snapshot of the current economy and return its 1-based rank,
    /// or `None` when it fell off the bottom of a full board.
    pub fn submit_score(&mut self, snapshot: &EconomySnapshot, now: i64) -> Option<usize> {
        let entry = LeaderboardEntry {
            id: Uuid::new_v4(),
            player_name: self.player_name.clone(),
            coins: snapshot.coins,
            miners: snapshot.miner_count,
            total_power: snapshot.total_power,
            timestamp: now,
        };
        let id = entry.id;
        self.entries.push(entry);
        // Stable sort keeps earlier submissions ahead on ties.
        self.entries
            .sort_by(|a, b| b.coins.partial_cmp(&a.coins).unwrap_or(Ordering::Equal));
        self.entries.truncate(LEADERBOARD_CAPACITY);

        let rank = self.entries.iter().position(|e| e.id == id).map(|i| i + 1);
        info!(coins = snapshot.coins, ?rank, "score submitted");
        rank
    }

    /// Best `limit` entries.
    pub fn top_scores(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn best_entry(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_TOP_SCORES;

    fn snapshot(coins: f64) -> EconomySnapshot {
        EconomySnapshot {
            coins,
            miner_count: 2,
            total_power: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_player_name() {
        assert_eq!(Leaderboard::new().player_name(), "Player");
    }

    #[test]
    fn test_set_player_name_trims_and_rejects_blank() {
        let mut board = Leaderboard::new();

        assert!(board.set_player_name("  Alice  "));
        assert_eq!(board.player_name(), "Alice");
        assert!(!board.set_player_name("   "));
        assert_eq!(board.player_name(), "Alice");
    }

    #[test]
    fn test_submit_score_ranks_by_coins() {
        let mut board = Leaderboard::new();

        assert_eq!(board.submit_score(&snapshot(100.0), 1), Some(1));
        assert_eq!(board.submit_score(&snapshot(300.0), 2), Some(1));
        assert_eq!(board.submit_score(&snapshot(200.0), 3), Some(2));

        let coins: Vec<f64> = board.entries().iter().map(|e| e.coins).collect();
        assert_eq!(coins, vec![300.0, 200.0, 100.0]);
        assert_eq!(board.best_entry().map(|e| e.timestamp), Some(2));
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new();
        board.submit_score(&snapshot(50.0), 1);

        assert_eq!(board.submit_score(&snapshot(50.0), 2), Some(2));
        assert_eq!(board.entries()[0].timestamp, 1);
    }

    #[test]
    fn test_capacity_truncates_lowest() {
        let mut board = Leaderboard::new();
        for i in 0..LEADERBOARD_CAPACITY {
            board.submit_score(&snapshot(1000.0 + i as f64), i as i64);
        }

        assert_eq!(board.submit_score(&snapshot(1.0), 999), None);
        assert_eq!(board.entries().len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.submit_score(&snapshot(5000.0), 1000), Some(1));
        assert_eq!(board.entries().len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.entries().last().map(|e| e.coins), Some(1001.0));
    }

    #[test]
    fn test_top_scores_limit() {
        let mut board = Leaderboard::new();
        assert!(board.top_scores(DEFAULT_TOP_SCORES).is_empty());
        for i in 0..15 {
            board.submit_score(&snapshot(i as f64), i);
        }

        let top = board.top_scores(DEFAULT_TOP_SCORES);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].coins, 14.0);
    }

    #[test]
    fn test_entry_carries_player_name() {
        let mut board = Leaderboard::new();
        board.set_player_name("Miner Max");
        board.submit_score(&snapshot(10.0), 0);

        assert_eq!(board.entries()[0].player_name, "Miner Max");
        assert_eq!(board.entries()[0].miners, 2);
    }
}
