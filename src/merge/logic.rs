//! Merge eligibility, the merge operation, and the click state machine.
//!
//! The merge engine never owns miners. It looks them up by id in the
//! [`EconomyEngine`] inventory and asks the economy to swap the pair for
//! their merged successor.

use super::types::{ClickOutcome, Selection};
use crate::core::constants::{GRID_SIZE, MAX_LEVEL};
use crate::economy::logic::{mining_rate, EconomyEngine};
use crate::economy::types::{Miner, MinerId};
use crate::error::{MergeError, MergeResult};
use tracing::debug;

/// Validate that `selected` can merge into `target`.
///
/// This is the single eligibility rule: both exist, they are different
/// miners, same currency, same level, and below [`MAX_LEVEL`].
pub fn check_merge(economy: &EconomyEngine, selected: MinerId, target: MinerId) -> MergeResult<()> {
    let a = economy
        .miner(selected)
        .ok_or(MergeError::NotFound(selected))?;
    let b = economy.miner(target).ok_or(MergeError::NotFound(target))?;

    if a.id == b.id {
        return Err(MergeError::SameMiner);
    }
    if a.currency != b.currency {
        return Err(MergeError::CurrencyMismatch {
            selected: a.currency,
            target: b.currency,
        });
    }
    if a.level != b.level {
        return Err(MergeError::LevelMismatch {
            selected: a.level,
            target: b.level,
        });
    }
    if a.level >= MAX_LEVEL {
        return Err(MergeError::MaxLevel(MAX_LEVEL));
    }
    Ok(())
}

pub fn can_merge(economy: &EconomyEngine, a: MinerId, b: MinerId) -> bool {
    check_merge(economy, a, b).is_ok()
}

/// Every miner that `id` could merge with, in inventory order.
pub fn mergeable_targets(economy: &EconomyEngine, id: MinerId) -> Vec<MinerId> {
    economy
        .miners()
        .iter()
        .filter(|m| can_merge(economy, id, m.id))
        .map(|m| m.id)
        .collect()
}

/// Merge two miners into one a level higher, placed on the target's cell.
/// Returns the new miner's id. On error nothing changes.
pub fn try_merge(economy: &mut EconomyEngine, selected: MinerId, target: MinerId) -> MergeResult<MinerId> {
    check_merge(economy, selected, target)?;

    let a = economy
        .take_miner(selected)
        .ok_or(MergeError::NotFound(selected))?;
    let Some(b) = economy.take_miner(target) else {
        economy.insert_miner(a);
        return Err(MergeError::NotFound(target));
    };

    let level = a.level + 1;
    let merged = Miner {
        id: MinerId::new(),
        currency: a.currency,
        level,
        mining_rate: mining_rate(a.currency, level),
        position: b.position,
    };
    let id = merged.id;

    economy.insert_miner(merged);
    economy.recompute_rate(a.currency);
    debug!(currency = %a.currency, level, %id, position = b.position, "miners merged");
    Ok(id)
}

/// Boolean form of [`try_merge`] for UI callers.
pub fn merge(economy: &mut EconomyEngine, selected: MinerId, target: MinerId) -> bool {
    match try_merge(economy, selected, target) {
        Ok(_) => true,
        Err(err) => {
            debug!(%selected, %target, %err, "merge rejected");
            false
        }
    }
}

/// First mergeable pair in inventory order, if any.
pub fn find_merge_pair(economy: &EconomyEngine) -> Option<(MinerId, MinerId)> {
    economy.miners().iter().find_map(|m| {
        mergeable_targets(economy, m.id)
            .first()
            .map(|target| (m.id, *target))
    })
}

/// Render view of the fixed grid: cell index to occupying miner.
pub fn grid_cells(economy: &EconomyEngine) -> Vec<Option<&Miner>> {
    let mut cells = vec![None; GRID_SIZE];
    for miner in economy.miners() {
        if let Some(cell) = cells.get_mut(miner.position) {
            *cell = Some(miner);
        }
    }
    cells
}

/// Drives the select-then-merge interaction on the grid.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    selection: Selection,
}

impl MergeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<MinerId> {
        self.selection.selected_id()
    }

    /// Whether `id` is highlighted as a merge target for the current selection.
    pub fn is_target(&self, id: MinerId) -> bool {
        self.selection.targets().contains(&id)
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Handle a click on a miner.
    ///
    /// Idle: select it and compute targets. Selected, same miner: deselect.
    /// Selected, other miner: attempt the merge, then return to idle whatever
    /// the outcome.
    pub fn click(&mut self, economy: &mut EconomyEngine, id: MinerId) -> ClickOutcome {
        match std::mem::take(&mut self.selection) {
            Selection::Idle => {
                if economy.miner(id).is_none() {
                    return ClickOutcome::Ignored;
                }
                let targets = mergeable_targets(economy, id);
                self.selection = Selection::Selected {
                    id,
                    targets: targets.clone(),
                };
                ClickOutcome::Selected { id, targets }
            }
            Selection::Selected { id: selected, .. } if selected == id => ClickOutcome::Deselected,
            Selection::Selected { id: selected, .. } => match try_merge(economy, selected, id) {
                Ok(merged) => ClickOutcome::Merged { id: merged },
                Err(err) => {
                    debug!(%selected, target = %id, %err, "merge rejected");
                    ClickOutcome::MergeRejected(err)
                }
            },
        }
    }

    /// Recompute targets after the inventory changed outside a click
    /// (purchase, move). Drops the selection if its miner is gone.
    pub fn refresh(&mut self, economy: &EconomyEngine) {
        if let Some(id) = self.selection.selected_id() {
            self.selection = if economy.miner(id).is_some() {
                Selection::Selected {
                    id,
                    targets: mergeable_targets(economy, id),
                }
            } else {
                Selection::Idle
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::types::{Currency, PerCurrency};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rich_economy() -> EconomyEngine {
        EconomyEngine::with_balances(PerCurrency::new(1e12, 1e12, 1e12), 0)
    }

    fn buy(economy: &mut EconomyEngine, currency: Currency, rng: &mut ChaCha8Rng) -> MinerId {
        economy.try_purchase(currency, rng).expect("purchase")
    }

    /// Force a miner to a given level (test-only shortcut).
    fn set_level(economy: &mut EconomyEngine, id: MinerId, level: u32) {
        let mut miner = economy.take_miner(id).unwrap();
        miner.level = level;
        miner.mining_rate = mining_rate(miner.currency, level);
        economy.insert_miner(miner);
        economy.recompute_rate(Currency::Emsx);
        economy.recompute_rate(Currency::Usdt);
        economy.recompute_rate(Currency::Ton);
    }

    #[test]
    fn test_merge_two_level_one_miners() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = buy(&mut economy, Currency::Emsx, &mut rng);
        let b = buy(&mut economy, Currency::Emsx, &mut rng);
        let a_pos = economy.miner(a).unwrap().position;
        let b_pos = economy.miner(b).unwrap().position;

        let id = try_merge(&mut economy, a, b).expect("merge");

        let merged = economy.miner(id).unwrap();
        assert_eq!(merged.level, 2);
        assert_eq!(merged.mining_rate, 0.1);
        assert_eq!(merged.position, b_pos);
        assert!(economy.miner_at(a_pos).is_none(), "source cell is vacated");
        assert!(economy.miner(a).is_none());
        assert!(economy.miner(b).is_none());
        assert_eq!(economy.miner_count(), 1);
        assert_eq!(economy.mining_rate_for(Currency::Emsx), 0.1);
        assert!(economy.verify_rates());
    }

    #[test]
    fn test_merge_rejections_have_no_side_effects() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let emsx = buy(&mut economy, Currency::Emsx, &mut rng);
        let ton = buy(&mut economy, Currency::Ton, &mut rng);
        let before = economy.clone();

        assert_eq!(
            try_merge(&mut economy, emsx, ton),
            Err(MergeError::CurrencyMismatch {
                selected: Currency::Emsx,
                target: Currency::Ton
            })
        );
        assert_eq!(try_merge(&mut economy, emsx, emsx), Err(MergeError::SameMiner));
        let ghost = MinerId::new();
        assert_eq!(try_merge(&mut economy, emsx, ghost), Err(MergeError::NotFound(ghost)));
        assert!(!merge(&mut economy, ghost, emsx));
        assert_eq!(economy, before);
    }

    #[test]
    fn test_level_mismatch_rejected() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = buy(&mut economy, Currency::Usdt, &mut rng);
        let b = buy(&mut economy, Currency::Usdt, &mut rng);
        set_level(&mut economy, b, 3);

        assert_eq!(
            check_merge(&economy, a, b),
            Err(MergeError::LevelMismatch { selected: 1, target: 3 })
        );
    }

    #[test]
    fn test_max_level_is_terminal() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let a = buy(&mut economy, Currency::Emsx, &mut rng);
        let b = buy(&mut economy, Currency::Emsx, &mut rng);
        set_level(&mut economy, a, MAX_LEVEL);
        set_level(&mut economy, b, MAX_LEVEL);

        assert_eq!(check_merge(&economy, a, b), Err(MergeError::MaxLevel(MAX_LEVEL)));
        assert!(mergeable_targets(&economy, a).is_empty());
        assert!(mergeable_targets(&economy, b).is_empty());
    }

    #[test]
    fn test_can_merge_is_symmetric() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ids = Vec::new();
        for currency in [Currency::Emsx, Currency::Emsx, Currency::Usdt, Currency::Emsx] {
            ids.push(buy(&mut economy, currency, &mut rng));
        }
        set_level(&mut economy, ids[3], 2);
        ids.push(MinerId::new());

        for a in &ids {
            for b in &ids {
                assert_eq!(can_merge(&economy, *a, *b), can_merge(&economy, *b, *a));
            }
        }
    }

    #[test]
    fn test_targets_agree_with_predicate() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let a = buy(&mut economy, Currency::Ton, &mut rng);
        let b = buy(&mut economy, Currency::Ton, &mut rng);
        let c = buy(&mut economy, Currency::Ton, &mut rng);
        buy(&mut economy, Currency::Emsx, &mut rng);

        let targets = mergeable_targets(&economy, a);

        assert_eq!(targets, vec![b, c]);
        for miner in economy.miners() {
            assert_eq!(targets.contains(&miner.id), can_merge(&economy, a, miner.id));
        }
    }

    #[test]
    fn test_click_state_machine() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let a = buy(&mut economy, Currency::Emsx, &mut rng);
        let b = buy(&mut economy, Currency::Emsx, &mut rng);
        let mut engine = MergeEngine::new();

        assert_eq!(
            engine.click(&mut economy, a),
            ClickOutcome::Selected { id: a, targets: vec![b] }
        );
        assert!(engine.is_target(b));
        assert_eq!(engine.click(&mut economy, a), ClickOutcome::Deselected);
        assert_eq!(engine.selection(), &Selection::Idle);

        engine.click(&mut economy, a);
        let outcome = engine.click(&mut economy, b);
        assert!(matches!(outcome, ClickOutcome::Merged { .. }));
        assert_eq!(engine.selection(), &Selection::Idle);
        assert_eq!(economy.miner_count(), 1);
    }

    #[test]
    fn test_click_failed_merge_still_clears_selection() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let a = buy(&mut economy, Currency::Emsx, &mut rng);
        let b = buy(&mut economy, Currency::Usdt, &mut rng);
        let mut engine = MergeEngine::new();

        engine.click(&mut economy, a);
        let outcome = engine.click(&mut economy, b);

        assert!(matches!(outcome, ClickOutcome::MergeRejected(MergeError::CurrencyMismatch { .. })));
        assert_eq!(engine.selected(), None);
        assert_eq!(economy.miner_count(), 2);
    }

    #[test]
    fn test_click_unknown_miner_is_ignored() {
        let mut economy = rich_economy();
        let mut engine = MergeEngine::new();
        assert_eq!(engine.click(&mut economy, MinerId::new()), ClickOutcome::Ignored);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_refresh_picks_up_new_targets_and_drops_stale_selection() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let a = buy(&mut economy, Currency::Emsx, &mut rng);
        let mut engine = MergeEngine::new();
        engine.click(&mut economy, a);
        assert!(engine.selection().targets().is_empty());

        let b = buy(&mut economy, Currency::Emsx, &mut rng);
        engine.refresh(&economy);
        assert_eq!(engine.selection().targets(), &[b]);

        economy.take_miner(a);
        engine.refresh(&economy);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_grid_cells_and_find_pair() {
        let mut economy = rich_economy();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(find_merge_pair(&economy).is_none());
        let a = buy(&mut economy, Currency::Ton, &mut rng);
        let b = buy(&mut economy, Currency::Ton, &mut rng);

        let cells = grid_cells(&economy);
        assert_eq!(cells.len(), GRID_SIZE);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 2);
        assert_eq!(find_merge_pair(&economy), Some((a, b)));
    }
}
