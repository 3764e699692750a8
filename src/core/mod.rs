//! Core driver: constants, time, the tick loop, and the application context.

pub mod clock;
pub mod constants;
pub mod context;
pub mod offline;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{GameContext, GameView};
pub use offline::{process_offline_progression, OfflineReport};
pub use tick::{game_tick, TickConfig, TickEvent, TickResult, TickSchedule};
