//! The per-tick orchestration function.
//!
//! `game_tick()` advances every engine by one driver step and returns a
//! [`TickResult`] describing what happened. It never touches storage: the
//! caller decides what to persist from the `*_changed` flags.

use crate::achievements::{get_achievement_def, AchievementId, Achievements};
use crate::core::constants::{
    AUTOSAVE_INTERVAL_MS, EVENT_CHECK_INTERVAL_MS, SCORE_SUBMIT_INTERVAL_MS,
};
use crate::economy::{AccrualReport, EconomyEngine};
use crate::events::{EventEngine, EventKind};
use crate::leaderboard::Leaderboard;
use rand::Rng;

/// A single event produced by a game tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// The active event ran past its duration and was completed.
    EventExpired { kind: EventKind },

    /// A random event started on the periodic roll.
    EventStarted {
        kind: EventKind,
        multiplier: f64,
        duration_ms: i64,
    },

    /// An achievement was completed this tick.
    AchievementUnlocked { id: AchievementId, name: String },

    /// A leaderboard snapshot was recorded.
    ScoreSubmitted { coins: f64, rank: Option<usize> },
}

/// Result of a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
    pub accrual: AccrualReport,
    /// Balances or the accrual timestamp moved.
    pub economy_changed: bool,
    pub events_changed: bool,
    pub achievements_changed: bool,
    pub leaderboard_changed: bool,
    /// The periodic economy save is due.
    pub autosave_due: bool,
}

/// Intervals for the periodic driver steps, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    pub event_check_interval_ms: i64,
    pub score_submit_interval_ms: i64,
    pub autosave_interval_ms: i64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            event_check_interval_ms: EVENT_CHECK_INTERVAL_MS,
            score_submit_interval_ms: SCORE_SUBMIT_INTERVAL_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
        }
    }
}

/// When each periodic step last ran. Not persisted: a fresh schedule
/// starts counting from the moment the game is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub config: TickConfig,
    pub last_event_check: i64,
    pub last_score_submit: i64,
    pub last_autosave: i64,
}

impl TickSchedule {
    pub fn new(config: TickConfig, now: i64) -> Self {
        Self {
            config,
            last_event_check: now,
            last_score_submit: now,
            last_autosave: now,
        }
    }

    /// Returns true and resets the marker when `interval` has passed.
    fn take_due(last: &mut i64, interval: i64, now: i64) -> bool {
        if now - *last >= interval {
            *last = now;
            true
        } else {
            false
        }
    }
}

/// Processes one driver step.
///
/// Order:
/// 1. Expire the active event if its window has passed
/// 2. Look up the three multipliers
/// 3. Accrue earnings since the last tick
/// 4. Re-check achievements against the new balances
/// 5. Roll for a random event (every `event_check_interval_ms`)
/// 6. Submit a leaderboard snapshot (every `score_submit_interval_ms`)
/// 7. Flag the periodic autosave (every `autosave_interval_ms`)
pub fn game_tick<R: Rng + ?Sized>(
    economy: &mut EconomyEngine,
    events: &mut EventEngine,
    achievements: &mut Achievements,
    leaderboard: &mut Leaderboard,
    schedule: &mut TickSchedule,
    now: i64,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    // ── 1. Event expiry ─────────────────────────────────────────
    if let Some(expired) = events.expire_if_elapsed(now) {
        result.events.push(TickEvent::EventExpired { kind: expired.kind });
        result.events_changed = true;
    }

    // ── 2-3. Multipliers and accrual ────────────────────────────
    let mult = events.multipliers(now);
    result.accrual = economy.accrue(now, mult.power, mult.coin, mult.efficiency);
    result.economy_changed = result.accrual.elapsed_seconds > 0.0;

    // ── 4. Achievements ─────────────────────────────────────────
    let snapshot = economy.snapshot();
    for id in achievements.check(&snapshot, now) {
        result.events.push(TickEvent::AchievementUnlocked {
            id,
            name: get_achievement_def(id).name.to_string(),
        });
        result.achievements_changed = true;
    }

    // ── 5. Random event roll ────────────────────────────────────
    let interval = schedule.config.event_check_interval_ms;
    if TickSchedule::take_due(&mut schedule.last_event_check, interval, now) {
        if let Some(event) = events.try_trigger_random(now, rng) {
            result.events.push(TickEvent::EventStarted {
                kind: event.kind,
                multiplier: event.multiplier,
                duration_ms: event.duration_ms,
            });
            result.events_changed = true;
        }
    }

    // ── 6. Leaderboard snapshot ─────────────────────────────────
    let interval = schedule.config.score_submit_interval_ms;
    if TickSchedule::take_due(&mut schedule.last_score_submit, interval, now) {
        let rank = leaderboard.submit_score(&snapshot, now);
        result.events.push(TickEvent::ScoreSubmitted {
            coins: snapshot.coins,
            rank,
        });
        result.leaderboard_changed = true;
    }

    // ── 7. Autosave ─────────────────────────────────────────────
    let interval = schedule.config.autosave_interval_ms;
    result.autosave_due = TickSchedule::take_due(&mut schedule.last_autosave, interval, now);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{EVENT_COOLDOWN_MS, EVENT_DURATION_MS};
    use crate::economy::Currency;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Harness {
        economy: EconomyEngine,
        events: EventEngine,
        achievements: Achievements,
        leaderboard: Leaderboard,
        schedule: TickSchedule,
        rng: ChaCha8Rng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                economy: EconomyEngine::new(0),
                events: EventEngine::new(),
                achievements: Achievements::default(),
                leaderboard: Leaderboard::new(),
                schedule: TickSchedule::new(TickConfig::default(), 0),
                rng: ChaCha8Rng::seed_from_u64(42),
            }
        }

        fn tick(&mut self, now: i64) -> TickResult {
            game_tick(
                &mut self.economy,
                &mut self.events,
                &mut self.achievements,
                &mut self.leaderboard,
                &mut self.schedule,
                now,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_tick_accrues_with_no_event() {
        let mut h = Harness::new();
        h.economy.purchase(Currency::Emsx, &mut h.rng);

        let result = h.tick(1_000);

        assert!(result.economy_changed);
        assert!((result.accrual.gains[Currency::Emsx] - 0.05).abs() < 1e-9);
        assert!((h.economy.balance(Currency::Emsx) - 900.05).abs() < 1e-9);
    }

    #[test]
    fn test_tick_same_timestamp_is_noop_for_economy() {
        let mut h = Harness::new();
        h.tick(500);

        let result = h.tick(500);

        assert!(!result.economy_changed);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_tick_applies_active_multiplier() {
        let mut h = Harness::new();
        h.economy.purchase(Currency::Usdt, &mut h.rng);
        h.events.try_start(EventKind::CoinRush, 0);

        let result = h.tick(10_000);

        assert!((result.accrual.gains[Currency::Usdt] - 0.03 * 10.0 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_expires_event_before_accrual() {
        let mut h = Harness::new();
        h.economy.purchase(Currency::Emsx, &mut h.rng);
        h.events.try_start(EventKind::PowerBoost, 0);

        let result = h.tick(EVENT_DURATION_MS + 1_000);

        assert!(result
            .events
            .contains(&TickEvent::EventExpired { kind: EventKind::PowerBoost }));
        assert!(result.events_changed);
        // Expired before the multiplier lookup, so the whole span is unboosted.
        assert!((result.accrual.gains[Currency::Emsx] - 0.05 * 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_unlocks_first_miner_achievement() {
        let mut h = Harness::new();
        h.economy.purchase(Currency::Ton, &mut h.rng);

        let result = h.tick(100);

        assert!(result.achievements_changed);
        assert!(result.events.iter().any(|e| matches!(
            e,
            TickEvent::AchievementUnlocked {
                id: AchievementId::FirstMiner,
                ..
            }
        )));
        assert!(!h.tick(200).achievements_changed);
    }

    #[test]
    fn test_event_roll_waits_for_interval() {
        let mut h = Harness::new();

        h.tick(EVENT_CHECK_INTERVAL_MS - 1);
        assert!(h.events.active().is_none());
        let result = h.tick(EVENT_CHECK_INTERVAL_MS);

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::EventStarted { .. })));
        assert!(h.events.active().is_some());
        assert_eq!(h.schedule.last_event_check, EVENT_CHECK_INTERVAL_MS);
    }

    #[test]
    fn test_event_roll_respects_cooldown() {
        let mut h = Harness::new();
        let mut started = 0;
        let mut now = 0;
        while now <= EVENT_COOLDOWN_MS {
            now += 1_000;
            let result = h.tick(now);
            started += result
                .events
                .iter()
                .filter(|e| matches!(e, TickEvent::EventStarted { .. }))
                .count();
        }
        // First roll at 30s, next allowed at 30s + cooldown.
        assert_eq!(started, 1);
    }

    #[test]
    fn test_score_submitted_every_interval() {
        let mut h = Harness::new();
        let mut now = 0;
        while now < SCORE_SUBMIT_INTERVAL_MS * 3 {
            now += 1_000;
            h.tick(now);
        }

        assert_eq!(h.leaderboard.entries().len(), 3);
    }

    #[test]
    fn test_autosave_flag_cadence() {
        let mut h = Harness::new();

        assert!(!h.tick(AUTOSAVE_INTERVAL_MS - 1).autosave_due);
        assert!(h.tick(AUTOSAVE_INTERVAL_MS).autosave_due);
        assert!(!h.tick(AUTOSAVE_INTERVAL_MS + 1).autosave_due);
    }

    #[test]
    fn test_custom_config_intervals() {
        let mut h = Harness::new();
        h.schedule = TickSchedule::new(
            TickConfig {
                event_check_interval_ms: 1_000,
                score_submit_interval_ms: 1_000,
                autosave_interval_ms: 1_000,
            },
            0,
        );

        let result = h.tick(1_000);

        assert!(result.leaderboard_changed);
        assert!(result.autosave_due);
        assert!(result.events_changed);
    }
}
