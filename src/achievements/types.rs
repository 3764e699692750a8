//! Achievement system types and data structures.

use crate::economy::types::EconomySnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstMiner,    // 1 miner
    CoinCollector, // 1,000 coins
    PowerPlayer,   // 10 total power
}

/// Which economy figure an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementMetric {
    Coins,
    Miners,
    Power,
}

impl AchievementMetric {
    /// Current value of this metric in a snapshot.
    pub fn current(&self, snapshot: &EconomySnapshot) -> f64 {
        match self {
            AchievementMetric::Coins => snapshot.total_earned,
            AchievementMetric::Miners => snapshot.miner_count as f64,
            AchievementMetric::Power => snapshot.total_power,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: f64,
    pub metric: AchievementMetric,
}

impl AchievementDef {
    pub fn is_met(&self, snapshot: &EconomySnapshot) -> bool {
        self.metric.current(snapshot) >= self.requirement
    }
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub unlocked_at: i64,
}

/// Render view of one achievement.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementView {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub completed: bool,
    /// 0.0 - 100.0
    pub progress: f64,
}

/// Achievement completion state (saved to disk).
///
/// Completion is monotonic: nothing ever removes an entry from `unlocked`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Achievements {
    unlocked: HashMap<AchievementId, UnlockedAchievement>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<i64> {
        self.unlocked.get(&id).map(|u| u.unlocked_at)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    fn unlock(&mut self, id: AchievementId, now: i64) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked
            .insert(id, UnlockedAchievement { unlocked_at: now });
        true
    }

    /// Re-evaluate every definition against `snapshot`, returning the ids
    /// completed by this call.
    pub fn check(&mut self, snapshot: &EconomySnapshot, now: i64) -> Vec<AchievementId> {
        use super::data::ALL_ACHIEVEMENTS;

        let mut newly = Vec::new();
        for def in ALL_ACHIEVEMENTS {
            if def.is_met(snapshot) && self.unlock(def.id, now) {
                info!(achievement = def.name, "achievement unlocked");
                newly.push(def.id);
            }
        }
        newly
    }

    /// Progress percentage toward `id`: 100 once completed, otherwise
    /// `min(100, 100 * current / requirement)`.
    pub fn progress(&self, id: AchievementId, snapshot: &EconomySnapshot) -> f64 {
        if self.is_unlocked(id) {
            return 100.0;
        }
        let def = super::data::get_achievement_def(id);
        if def.requirement <= 0.0 {
            return 100.0;
        }
        (100.0 * def.metric.current(snapshot) / def.requirement).clamp(0.0, 100.0)
    }

    /// All achievements in display order with completion and progress.
    pub fn views(&self, snapshot: &EconomySnapshot) -> Vec<AchievementView> {
        use super::data::ALL_ACHIEVEMENTS;

        ALL_ACHIEVEMENTS
            .iter()
            .map(|def| AchievementView {
                id: def.id,
                name: def.name,
                description: def.description,
                icon: def.icon,
                completed: self.is_unlocked(def.id),
                progress: self.progress(def.id, snapshot),
            })
            .collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    /// Share of achievements completed (0.0 - 100.0).
    pub fn completion_percentage(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f64 / total as f64) * 100.0
    }
}
