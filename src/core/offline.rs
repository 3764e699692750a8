//! Offline progression.
//!
//! Earnings accrue from the saved accrual timestamp to now with no cap, at
//! whatever multipliers are still live when the game comes back.

use crate::economy::{EconomyEngine, PerCurrency};
use crate::events::EventEngine;
use tracing::info;

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: f64,
    pub gains: PerCurrency<f64>,
}

impl OfflineReport {
    pub fn is_empty(&self) -> bool {
        self.elapsed_seconds <= 0.0
    }
}

/// Credits earnings for the time the game was closed.
///
/// An event that ran out while offline is completed first, so it does not
/// boost the catch-up.
pub fn process_offline_progression(
    economy: &mut EconomyEngine,
    events: &mut EventEngine,
    now: i64,
) -> OfflineReport {
    if now <= economy.last_accrual() {
        return OfflineReport::default();
    }

    events.expire_if_elapsed(now);
    let mult = events.multipliers(now);
    let accrual = economy.accrue(now, mult.power, mult.coin, mult.efficiency);

    info!(
        elapsed_seconds = accrual.elapsed_seconds,
        total_gains = accrual.gains.total(),
        "offline progression applied"
    );

    OfflineReport {
        elapsed_seconds: accrual.elapsed_seconds,
        gains: accrual.gains,
    }
}
