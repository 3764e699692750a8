//! Economy data structures: currencies, miners, and per-currency tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use uuid::Uuid;

/// The three parallel economies. Each has its own balance and mining rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    Emsx,
    Usdt,
    Ton,
}

impl Currency {
    /// All currencies in display order.
    pub const ALL: [Currency; 3] = [Currency::Emsx, Currency::Usdt, Currency::Ton];

    /// Ticker shown next to balances.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Emsx => "EMSX",
            Currency::Usdt => "USDT",
            Currency::Ton => "TON",
        }
    }

    /// Display label for the purchase button.
    pub fn miner_label(&self) -> &'static str {
        match self {
            Currency::Emsx => "EMSX Miner",
            Currency::Usdt => "USDT Miner",
            Currency::Ton => "TON Miner",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A fixed table holding one value per [`Currency`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerCurrency<T> {
    pub emsx: T,
    pub usdt: T,
    pub ton: T,
}

impl<T> PerCurrency<T> {
    pub const fn new(emsx: T, usdt: T, ton: T) -> Self {
        Self { emsx, usdt, ton }
    }

    /// Iterate `(currency, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, &T)> {
        Currency::ALL.into_iter().map(move |c| (c, &self[c]))
    }
}

impl PerCurrency<f64> {
    pub const ZERO: PerCurrency<f64> = PerCurrency::new(0.0, 0.0, 0.0);

    pub fn total(&self) -> f64 {
        self.emsx + self.usdt + self.ton
    }

    pub fn is_zero(&self) -> bool {
        self.emsx == 0.0 && self.usdt == 0.0 && self.ton == 0.0
    }
}

impl<T> Index<Currency> for PerCurrency<T> {
    type Output = T;

    fn index(&self, currency: Currency) -> &T {
        match currency {
            Currency::Emsx => &self.emsx,
            Currency::Usdt => &self.usdt,
            Currency::Ton => &self.ton,
        }
    }
}

impl<T> IndexMut<Currency> for PerCurrency<T> {
    fn index_mut(&mut self, currency: Currency) -> &mut T {
        match currency {
            Currency::Emsx => &mut self.emsx,
            Currency::Usdt => &mut self.usdt,
            Currency::Ton => &mut self.ton,
        }
    }
}

/// Unique, immutable miner identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MinerId(pub Uuid);

impl MinerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MinerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MinerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A placed production unit.
///
/// Identity and currency never change. A miner is never upgraded in place:
/// merging destroys both sources and creates a fresh miner one level higher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Miner {
    pub id: MinerId,
    pub currency: Currency,
    pub level: u32,
    /// Units of `currency` per second, derived from `(currency, level)`.
    pub mining_rate: f64,
    /// Grid cell index, unique among active miners.
    pub position: usize,
}

/// Read-only view of the economy consumed by achievements and the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EconomySnapshot {
    /// Primary score: the EMSX balance.
    pub coins: f64,
    /// EMSX produced by miners over the lifetime of the save.
    pub total_earned: f64,
    pub balances: PerCurrency<f64>,
    pub rates: PerCurrency<f64>,
    pub miner_count: usize,
    /// Sum of every miner's rate across all currencies.
    pub total_power: f64,
}

/// What a single accrual call credited.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccrualReport {
    pub elapsed_seconds: f64,
    pub gains: PerCurrency<f64>,
}
