//! Achievement system module.
//!
//! Completion is derived from economy snapshots once per tick and never
//! reverts.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use types::{AchievementDef, AchievementId, AchievementMetric, AchievementView, Achievements};
