//! Error types for the economy, merge, and persistence layers.
//!
//! None of these are fatal. Player actions expose boolean wrappers over the
//! typed forms, and persistence errors are logged and swallowed so the tick
//! loop never aborts.

use crate::economy::types::{Currency, MinerId};
use thiserror::Error;

/// Why a purchase or inventory operation was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomyError {
    /// Balance is below the price.
    #[error("insufficient {currency} funds: need {cost:.2}, have {balance:.2}")]
    InsufficientFunds {
        currency: Currency,
        cost: f64,
        balance: f64,
    },

    /// Every grid cell is already occupied.
    #[error("grid full: capacity {capacity}")]
    CapacityExceeded { capacity: usize },

    /// The miner id does not resolve to an active miner.
    #[error("miner not found: {0}")]
    NotFound(MinerId),
    /// Target cell is off the grid or held by another miner.
    #[error("cell {position} is not available")]
    CellUnavailable { position: usize },
}

/// Why two miners cannot be merged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeError {
    #[error("miner not found: {0}")]
    NotFound(MinerId),

    #[error("cannot merge a miner with itself")]
    SameMiner,

    #[error("currency mismatch: {selected} vs {target}")]
    CurrencyMismatch { selected: Currency, target: Currency },

    #[error("level mismatch: {selected} vs {target}")]
    LevelMismatch { selected: u32, target: u32 },

    #[error("miner already at max level {0}")]
    MaxLevel(u32),
}

/// Failure to encode, decode, read, or write a persisted store.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot codec: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("invalid snapshot magic: 0x{found:016X}")]
    BadMagic { found: u64 },

    #[error("schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("snapshot checksum verification failed")]
    ChecksumMismatch,
}

pub type EconomyResult<T> = Result<T, EconomyError>;
pub type MergeResult<T> = Result<T, MergeError>;
pub type PersistResult<T> = Result<T, PersistError>;
