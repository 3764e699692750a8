//! Economy balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded sessions of a greedy bot against the real
//! [`GameContext`](crate::core::context::GameContext) to analyze:
//! - Balance growth per currency over a session
//! - How far merging gets miners up the level ladder
//! - When each achievement unlocks
//! - How often events fire

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{AchievementStat, SimReport};
pub use runner::{run_simulation, RunStats};
