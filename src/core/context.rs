//! Application context: owns every engine plus the injected clock, storage
//! and random source, and decides what gets persisted when.

use super::clock::Clock;
use super::offline::{process_offline_progression, OfflineReport};
use super::tick::{game_tick, TickConfig, TickResult, TickSchedule};
use crate::achievements::{AchievementView, Achievements};
use crate::core::constants::DEFAULT_TOP_SCORES;
use crate::economy::{Currency, EconomyEngine, Miner, MinerId, PerCurrency};
use crate::error::EconomyResult;
use crate::events::{ActiveEventSummary, EventEngine};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::merge::{self, ClickOutcome, MergeEngine};
use crate::persistence::{
    self, Storage, ACHIEVEMENTS_STORE, ECONOMY_STORE, EVENTS_STORE, LEADERBOARD_STORE,
};
use rand::Rng;
use tracing::{debug, warn};

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub balances: PerCurrency<f64>,
    pub rates: PerCurrency<f64>,
    /// Price of the next miner per currency.
    pub costs: PerCurrency<f64>,
    pub miners: Vec<Miner>,
    pub selected: Option<MinerId>,
    pub merge_targets: Vec<MinerId>,
    pub active_event: Option<ActiveEventSummary>,
    pub achievements: Vec<AchievementView>,
    pub top_scores: Vec<LeaderboardEntry>,
    pub player_name: String,
}

pub struct GameContext<C: Clock, S: Storage, R: Rng> {
    clock: C,
    storage: S,
    rng: R,
    economy: EconomyEngine,
    merge: MergeEngine,
    events: EventEngine,
    achievements: Achievements,
    leaderboard: Leaderboard,
    schedule: TickSchedule,
}

impl<C: Clock, S: Storage, R: Rng> GameContext<C, S, R> {
    /// Load every store with the default tick intervals.
    pub fn load(clock: C, storage: S, rng: R) -> Self {
        Self::load_with_config(clock, storage, rng, TickConfig::default())
    }

    /// Load every store; anything missing or unreadable starts fresh.
    pub fn load_with_config(clock: C, storage: S, rng: R, config: TickConfig) -> Self {
        let now = clock.now_millis();

        let mut economy: EconomyEngine =
            persistence::load_or_else(&storage, ECONOMY_STORE, || EconomyEngine::new(now));
        if !economy.verify_rates() {
            warn!("cached mining rates out of sync with miners, recomputing");
            economy.refresh_rates();
        }
        let mut events: EventEngine =
            persistence::load_or_else(&storage, EVENTS_STORE, EventEngine::default);
        events.repair();
        let achievements: Achievements =
            persistence::load_or_else(&storage, ACHIEVEMENTS_STORE, Achievements::default);
        let leaderboard: Leaderboard =
            persistence::load_or_else(&storage, LEADERBOARD_STORE, Leaderboard::default);

        debug!(
            miners = economy.miner_count(),
            last_accrual = economy.last_accrual(),
            "game context loaded"
        );

        Self {
            clock,
            storage,
            rng,
            economy,
            merge: MergeEngine::new(),
            events,
            achievements,
            leaderboard,
            schedule: TickSchedule::new(config, now),
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn economy(&self) -> &EconomyEngine {
        &self.economy
    }

    pub fn events(&self) -> &EventEngine {
        &self.events
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn merge_state(&self) -> &MergeEngine {
        &self.merge
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ── Driver ──────────────────────────────────────────────────

    /// Credit the time since the last save. Call once after `load`.
    pub fn catch_up(&mut self) -> OfflineReport {
        let now = self.clock.now_millis();
        let report = process_offline_progression(&mut self.economy, &mut self.events, now);
        if !report.is_empty() {
            self.save_economy();
            self.save_events();
        }
        report
    }

    /// Run one driver step and persist whatever it changed.
    pub fn tick(&mut self) -> TickResult {
        let now = self.clock.now_millis();
        let result = game_tick(
            &mut self.economy,
            &mut self.events,
            &mut self.achievements,
            &mut self.leaderboard,
            &mut self.schedule,
            now,
            &mut self.rng,
        );

        if result.events_changed {
            self.save_events();
        }
        if result.achievements_changed {
            self.save_achievements();
        }
        if result.leaderboard_changed {
            self.save_leaderboard();
        }
        if result.autosave_due {
            self.save_economy();
        }
        result
    }

    // ── Player actions ──────────────────────────────────────────

    pub fn try_purchase(&mut self, currency: Currency) -> EconomyResult<MinerId> {
        let id = self.economy.try_purchase(currency, &mut self.rng)?;
        self.merge.refresh(&self.economy);
        self.save_economy();
        Ok(id)
    }

    pub fn purchase(&mut self, currency: Currency) -> bool {
        if self.economy.purchase(currency, &mut self.rng) {
            self.merge.refresh(&self.economy);
            self.save_economy();
            true
        } else {
            false
        }
    }

    /// Route a grid click through the selection state machine.
    pub fn click_miner(&mut self, id: MinerId) -> ClickOutcome {
        let outcome = self.merge.click(&mut self.economy, id);
        if matches!(outcome, ClickOutcome::Merged { .. }) {
            self.save_economy();
        }
        outcome
    }

    /// Merge two miners directly, bypassing the selection.
    pub fn merge(&mut self, selected: MinerId, target: MinerId) -> bool {
        if merge::merge(&mut self.economy, selected, target) {
            self.merge.refresh(&self.economy);
            self.save_economy();
            true
        } else {
            false
        }
    }

    pub fn move_miner(&mut self, id: MinerId, position: usize) -> bool {
        if self.economy.move_miner(id, position) {
            self.merge.refresh(&self.economy);
            self.save_economy();
            true
        } else {
            false
        }
    }

    pub fn set_player_name(&mut self, name: &str) -> bool {
        if self.leaderboard.set_player_name(name) {
            self.save_leaderboard();
            true
        } else {
            false
        }
    }

    // ── View ────────────────────────────────────────────────────

    pub fn view(&self) -> GameView {
        let now = self.clock.now_millis();
        let snapshot = self.economy.snapshot();
        GameView {
            balances: *self.economy.balances(),
            rates: *self.economy.mining_rates(),
            costs: PerCurrency::new(
                self.economy.miner_cost(Currency::Emsx),
                self.economy.miner_cost(Currency::Usdt),
                self.economy.miner_cost(Currency::Ton),
            ),
            miners: self.economy.miners().to_vec(),
            selected: self.merge.selected(),
            merge_targets: self.merge.selection().targets().to_vec(),
            active_event: self.events.active_summary(now),
            achievements: self.achievements.views(&snapshot),
            top_scores: self.leaderboard.top_scores(DEFAULT_TOP_SCORES).to_vec(),
            player_name: self.leaderboard.player_name().to_string(),
        }
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Write every store.
    pub fn save_all(&mut self) {
        self.save_economy();
        self.save_events();
        self.save_achievements();
        self.save_leaderboard();
    }

    fn save_economy(&mut self) {
        persistence::save(&mut self.storage, ECONOMY_STORE, &self.economy);
    }

    fn save_events(&mut self) {
        persistence::save(&mut self.storage, EVENTS_STORE, &self.events);
    }

    fn save_achievements(&mut self) {
        persistence::save(&mut self.storage, ACHIEVEMENTS_STORE, &self.achievements);
    }

    fn save_leaderboard(&mut self) {
        persistence::save(&mut self.storage, LEADERBOARD_STORE, &self.leaderboard);
    }
}
