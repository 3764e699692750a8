//! Economy engine: balances, miner inventory, cost curve, and accrual.

use super::types::{AccrualReport, Currency, EconomySnapshot, Miner, MinerId, PerCurrency};
use crate::core::constants::{
    GRID_SIZE, MILLIS_PER_SECOND, MINER_BASE_COSTS, MINER_BASE_RATES, MINER_COST_GROWTH,
    MINER_RATE_LEVEL_FACTOR, STARTING_BALANCES,
};
use crate::error::{EconomyError, EconomyResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mining rate of a miner: `base_rate(currency) * 2^(level - 1)`.
pub fn mining_rate(currency: Currency, level: u32) -> f64 {
    let exponent = level.saturating_sub(1) as i32;
    MINER_BASE_RATES[currency] * MINER_RATE_LEVEL_FACTOR.powi(exponent)
}

/// Price of the next miner when `owned` miners of that currency already exist.
pub fn miner_cost_for(currency: Currency, owned: usize) -> f64 {
    MINER_BASE_COSTS[currency] * MINER_COST_GROWTH.powi(owned as i32)
}

/// Owns balances, the miner inventory, and the cached per-currency rates.
///
/// Invariant: `mining_rates[c]` equals the sum of `mining_rate` over active
/// miners of currency `c`. It is recomputed on every structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyEngine {
    balances: PerCurrency<f64>,
    miners: Vec<Miner>,
    mining_rates: PerCurrency<f64>,
    last_accrual: i64,
    /// Lifetime accrual per currency. Purchases never reduce it.
    #[serde(default)]
    total_earned: PerCurrency<f64>,
}

impl EconomyEngine {
    /// Fresh economy with the starting balances and no miners.
    pub fn new(now: i64) -> Self {
        Self::with_balances(STARTING_BALANCES, now)
    }

    pub fn with_balances(balances: PerCurrency<f64>, now: i64) -> Self {
        Self {
            balances,
            miners: Vec::new(),
            mining_rates: PerCurrency::ZERO,
            last_accrual: now,
            total_earned: PerCurrency::ZERO,
        }
    }

    pub fn balances(&self) -> &PerCurrency<f64> {
        &self.balances
    }

    pub fn balance(&self, currency: Currency) -> f64 {
        self.balances[currency]
    }

    pub fn mining_rates(&self) -> &PerCurrency<f64> {
        &self.mining_rates
    }

    pub fn mining_rate_for(&self, currency: Currency) -> f64 {
        self.mining_rates[currency]
    }

    pub fn miners(&self) -> &[Miner] {
        &self.miners
    }

    pub fn miner(&self, id: MinerId) -> Option<&Miner> {
        self.miners.iter().find(|m| m.id == id)
    }

    pub fn miner_at(&self, position: usize) -> Option<&Miner> {
        self.miners.iter().find(|m| m.position == position)
    }

    pub fn miner_count(&self) -> usize {
        self.miners.len()
    }

    pub fn owned_count(&self, currency: Currency) -> usize {
        self.miners.iter().filter(|m| m.currency == currency).count()
    }

    pub fn total_earned(&self, currency: Currency) -> f64 {
        self.total_earned[currency]
    }

    pub fn last_accrual(&self) -> i64 {
        self.last_accrual
    }

    /// Price of the next miner of `currency`.
    pub fn miner_cost(&self, currency: Currency) -> f64 {
        miner_cost_for(currency, self.owned_count(currency))
    }

    pub fn can_afford(&self, currency: Currency) -> bool {
        self.balances[currency] >= self.miner_cost(currency)
    }

    pub fn is_full(&self) -> bool {
        self.miners.len() >= GRID_SIZE
    }

    /// Unoccupied grid cells in ascending order.
    pub fn free_cells(&self) -> Vec<usize> {
        (0..GRID_SIZE)
            .filter(|pos| self.miner_at(*pos).is_none())
            .collect()
    }

    /// Buy a level-1 miner on a uniformly random free cell.
    pub fn try_purchase<R: Rng + ?Sized>(
        &mut self,
        currency: Currency,
        rng: &mut R,
    ) -> EconomyResult<MinerId> {
        let cost = self.miner_cost(currency);
        let balance = self.balances[currency];
        if balance < cost {
            return Err(EconomyError::InsufficientFunds {
                currency,
                cost,
                balance,
            });
        }
        if self.is_full() {
            return Err(EconomyError::CapacityExceeded {
                capacity: GRID_SIZE,
            });
        }
        let position = *self
            .free_cells()
            .choose(rng)
            .ok_or(EconomyError::CapacityExceeded {
                capacity: GRID_SIZE,
            })?;

        let miner = Miner {
            id: MinerId::new(),
            currency,
            level: 1,
            mining_rate: mining_rate(currency, 1),
            position,
        };
        let id = miner.id;

        self.balances[currency] -= cost;
        self.miners.push(miner);
        self.recompute_rate(currency);
        debug!(%currency, %id, position, cost, "miner purchased");
        Ok(id)
    }

    /// Boolean form of [`try_purchase`](Self::try_purchase) for UI callers.
    pub fn purchase<R: Rng + ?Sized>(&mut self, currency: Currency, rng: &mut R) -> bool {
        match self.try_purchase(currency, rng) {
            Ok(_) => true,
            Err(err) => {
                debug!(%currency, %err, "purchase rejected");
                false
            }
        }
    }

    /// Credit earnings for the time since the last accrual.
    ///
    /// Each miner contributes `rate * power_mult * efficiency_mult * elapsed`
    /// to its own currency, and each currency's total is scaled by
    /// `coin_mult`. Elapsed time is not capped, so a single call after a long
    /// absence performs the whole offline catch-up. A non-positive interval is
    /// a no-op and leaves the timestamp untouched.
    pub fn accrue(
        &mut self,
        now: i64,
        power_mult: f64,
        coin_mult: f64,
        efficiency_mult: f64,
    ) -> AccrualReport {
        let elapsed_ms = now - self.last_accrual;
        if elapsed_ms <= 0 {
            return AccrualReport::default();
        }
        let elapsed_seconds = elapsed_ms as f64 / MILLIS_PER_SECOND as f64;

        let mut gains = PerCurrency::ZERO;
        for miner in &self.miners {
            gains[miner.currency] +=
                miner.mining_rate * power_mult * efficiency_mult * elapsed_seconds;
        }
        for currency in Currency::ALL {
            gains[currency] *= coin_mult;
            self.balances[currency] += gains[currency];
            self.total_earned[currency] += gains[currency];
        }
        self.last_accrual = now;

        AccrualReport {
            elapsed_seconds,
            gains,
        }
    }

    /// Move a miner to an empty cell.
    pub fn try_move_miner(&mut self, id: MinerId, position: usize) -> EconomyResult<()> {
        if self.miner(id).is_none() {
            return Err(EconomyError::NotFound(id));
        }
        let occupied = self
            .miners
            .iter()
            .any(|m| m.id != id && m.position == position);
        if position >= GRID_SIZE || occupied {
            return Err(EconomyError::CellUnavailable { position });
        }
        if let Some(miner) = self.miners.iter_mut().find(|m| m.id == id) {
            miner.position = position;
        }
        Ok(())
    }

    /// Move a miner to an empty cell. Unknown ids, out-of-range cells, and
    /// cells held by another miner are ignored.
    pub fn move_miner(&mut self, id: MinerId, position: usize) -> bool {
        match self.try_move_miner(id, position) {
            Ok(()) => true,
            Err(err) => {
                debug!(%id, position, %err, "move rejected");
                false
            }
        }
    }

    pub fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            coins: self.balances[Currency::Emsx],
            total_earned: self.total_earned[Currency::Emsx],
            balances: self.balances,
            rates: self.mining_rates,
            miner_count: self.miners.len(),
            total_power: self.miners.iter().map(|m| m.mining_rate).sum(),
        }
    }

    /// True when every cached rate matches the sum over its miners.
    pub fn verify_rates(&self) -> bool {
        Currency::ALL.into_iter().all(|currency| {
            let expected: f64 = self
                .miners
                .iter()
                .filter(|m| m.currency == currency)
                .map(|m| m.mining_rate)
                .sum();
            (self.mining_rates[currency] - expected).abs() < 1e-9
        })
    }

    /// Re-derive every miner's rate and every cached total. Run after
    /// loading a snapshot so tuning changes apply to saved miners.
    pub fn refresh_rates(&mut self) {
        for miner in &mut self.miners {
            miner.mining_rate = mining_rate(miner.currency, miner.level);
        }
        for currency in Currency::ALL {
            self.recompute_rate(currency);
        }
    }

    // ── Inventory primitives used by the merge engine ───────────

    pub(crate) fn take_miner(&mut self, id: MinerId) -> Option<Miner> {
        let index = self.miners.iter().position(|m| m.id == id)?;
        Some(self.miners.remove(index))
    }

    pub(crate) fn insert_miner(&mut self, miner: Miner) {
        self.miners.push(miner);
    }

    pub(crate) fn recompute_rate(&mut self, currency: Currency) {
        self.mining_rates[currency] = self
            .miners
            .iter()
            .filter(|m| m.currency == currency)
            .map(|m| m.mining_rate)
            .sum();
    }
}
