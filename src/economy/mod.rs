//! Miner economy: three parallel currencies, a geometric purchase cost
//! curve, exponential per-level mining rates, and time-based accrual.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
