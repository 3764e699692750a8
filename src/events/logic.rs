//! Event engine: random triggering, cooldown, expiry, and multiplier lookup.

use super::data::{template_for, EVENT_CATALOG};
use super::types::{ActiveEventSummary, EventKind, EventTemplate, GameEvent, Multipliers};
use crate::core::constants::{EVENT_COOLDOWN_MS, MILLIS_PER_SECOND};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Owns the single active event slot, the trigger cooldown, and history.
///
/// At most one event is active at a time. The copy in `history` mirrors
/// the active slot's `active` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventEngine {
    active: Option<GameEvent>,
    last_trigger_time: Option<i64>,
    history: Vec<GameEvent>,
}

impl EventEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&GameEvent> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    pub fn last_trigger_time(&self) -> Option<i64> {
        self.last_trigger_time
    }

    pub fn on_cooldown(&self, now: i64) -> bool {
        self.last_trigger_time
            .is_some_and(|last| now - last < EVENT_COOLDOWN_MS)
    }

    /// Start a uniformly chosen catalog event, unless one is already active
    /// or the cooldown since the last trigger has not elapsed.
    pub fn try_trigger_random<R: Rng + ?Sized>(
        &mut self,
        now: i64,
        rng: &mut R,
    ) -> Option<&GameEvent> {
        if self.active.is_some() || self.on_cooldown(now) {
            return None;
        }
        let template = EVENT_CATALOG.choose(rng)?;
        Some(self.start(template, now))
    }

    /// Start a specific event under the same gates as a random roll.
    pub fn try_start(&mut self, kind: EventKind, now: i64) -> Option<&GameEvent> {
        if self.active.is_some() || self.on_cooldown(now) {
            return None;
        }
        let template = template_for(kind)?;
        Some(self.start(template, now))
    }

    fn start(&mut self, template: &EventTemplate, now: i64) -> &GameEvent {
        let event = GameEvent::from_template(template, now);
        info!(
            kind = ?event.kind,
            multiplier = event.multiplier,
            duration_ms = event.duration_ms,
            "event started"
        );
        self.history.push(event.clone());
        self.last_trigger_time = Some(now);
        self.active.insert(event)
    }

    /// Multiplier for `kind` at `now`; 1 when no matching event runs.
    ///
    /// Not a pure read: a matching event found past its duration is
    /// completed here before returning 1. Drivers that want reads without
    /// side effects call [`expire_if_elapsed`](Self::expire_if_elapsed)
    /// first.
    pub fn multiplier_for(&mut self, kind: EventKind, now: i64) -> f64 {
        let Some(event) = &self.active else {
            return 1.0;
        };
        if event.kind != kind {
            return 1.0;
        }
        if event.is_expired_at(now) {
            self.complete_event();
            return 1.0;
        }
        event.multiplier
    }

    pub fn multipliers(&mut self, now: i64) -> Multipliers {
        Multipliers {
            power: self.multiplier_for(EventKind::PowerBoost, now),
            coin: self.multiplier_for(EventKind::CoinRush, now),
            efficiency: self.multiplier_for(EventKind::Efficiency, now),
        }
    }

    /// End the active event. No-op when nothing is active.
    pub fn complete_event(&mut self) -> Option<GameEvent> {
        let mut finished = self.active.take()?;
        finished.active = false;
        if let Some(entry) = self.history.iter_mut().find(|e| e.id == finished.id) {
            entry.active = false;
        }
        info!(kind = ?finished.kind, "event completed");
        Some(finished)
    }

    /// True when the active event has run past its duration.
    pub fn is_expired(&self, now: i64) -> bool {
        self.active.as_ref().is_some_and(|e| e.is_expired_at(now))
    }

    /// Complete the active event if it has expired.
    pub fn expire_if_elapsed(&mut self, now: i64) -> Option<GameEvent> {
        if self.is_expired(now) {
            self.complete_event()
        } else {
            None
        }
    }

    /// Display data for the running event. Never mutates; an expired event
    /// still shows with zero seconds until the driver expires it.
    pub fn active_summary(&self, now: i64) -> Option<ActiveEventSummary> {
        let event = self.active.as_ref()?;
        let remaining_ms = event.remaining_ms(now);
        Some(ActiveEventSummary {
            kind: event.kind,
            title: event.kind.name(),
            description: event.kind.description(),
            multiplier: event.multiplier,
            remaining_secs: (remaining_ms + MILLIS_PER_SECOND - 1) / MILLIS_PER_SECOND,
        })
    }

    /// Restore the one-active-event invariant on a loaded snapshot: only
    /// the history entry matching the active slot may be flagged active.
    pub fn repair(&mut self) {
        let active_id = self.active.as_ref().map(|e| e.id);
        for entry in &mut self.history {
            entry.active = Some(entry.id) == active_id;
        }
    }
}
