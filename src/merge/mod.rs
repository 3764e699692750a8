//! Grid merging: two same-currency, same-level miners become one miner a
//! level higher on the target's cell.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
