//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId, AchievementMetric};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstMiner,
        name: "First Steps",
        description: "Purchase your first miner",
        icon: "👷",
        requirement: 1.0,
        metric: AchievementMetric::Miners,
    },
    AchievementDef {
        id: AchievementId::CoinCollector,
        name: "Coin Collector",
        description: "Earn 1,000 coins",
        icon: "💰",
        requirement: 1000.0,
        metric: AchievementMetric::Coins,
    },
    AchievementDef {
        id: AchievementId::PowerPlayer,
        name: "Power Player",
        description: "Reach 10 total mining power",
        icon: "⚡",
        requirement: 10.0,
        metric: AchievementMetric::Power,
    },
];

/// Look up the definition for an id.
pub fn get_achievement_def(id: AchievementId) -> &'static AchievementDef {
    match id {
        AchievementId::FirstMiner => &ALL_ACHIEVEMENTS[0],
        AchievementId::CoinCollector => &ALL_ACHIEVEMENTS[1],
        AchievementId::PowerPlayer => &ALL_ACHIEVEMENTS[2],
    }
}
