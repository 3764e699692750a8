//! Leaderboard entry type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submitted score snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub player_name: String,
    pub coins: f64,
    pub miners: usize,
    pub total_power: f64,
    /// Submission time in epoch milliseconds.
    pub timestamp: i64,
}
