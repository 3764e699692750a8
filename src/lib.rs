//! EMSX Miner - idle merge-mining game engine.
//!
//! Miners produce one of three currencies on a fixed grid; two miners of the
//! same currency and level merge into one of the next level. Random timed
//! events boost earnings, achievements and a local leaderboard track
//! progress, and every store is persisted through an injected [`Storage`].
//!
//! [`Storage`]: persistence::Storage

pub mod achievements;
pub mod build_info;
pub mod core;
pub mod economy;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod merge;
pub mod persistence;
pub mod simulator;

pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::context::{GameContext, GameView};
pub use crate::core::offline::{process_offline_progression, OfflineReport};
pub use crate::core::tick::{game_tick, TickConfig, TickEvent, TickResult, TickSchedule};
pub use economy::{Currency, EconomyEngine, Miner, MinerId};
pub use error::{EconomyError, MergeError, PersistError};
