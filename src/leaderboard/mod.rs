//! Local score history.

pub mod logic;
pub mod types;

pub use logic::Leaderboard;
pub use types::LeaderboardEntry;
