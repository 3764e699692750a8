//! Timed multiplier events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which earnings dimension an event boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Scales each miner's output.
    PowerBoost,
    /// Scales the summed gain per currency.
    CoinRush,
    /// Scales each miner's efficiency.
    Efficiency,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::PowerBoost,
        EventKind::CoinRush,
        EventKind::Efficiency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PowerBoost => "Power Surge",
            EventKind::CoinRush => "Gold Rush",
            EventKind::Efficiency => "Efficiency Boost",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::PowerBoost => "Mining power increased by 2x!",
            EventKind::CoinRush => "Coin earnings increased by 3x!",
            EventKind::Efficiency => "Miner efficiency increased by 2.5x!",
        }
    }
}

/// Catalog entry an event is instantiated from.
#[derive(Debug, Clone)]
pub struct EventTemplate {
    pub kind: EventKind,
    pub multiplier: f64,
    pub duration_ms: i64,
}

/// An active or finished event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub multiplier: f64,
    pub duration_ms: i64,
    /// `None` means never started.
    pub start_time: Option<i64>,
    pub active: bool,
}

impl GameEvent {
    pub fn from_template(template: &EventTemplate, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: template.kind,
            multiplier: template.multiplier,
            duration_ms: template.duration_ms,
            start_time: Some(now),
            active: true,
        }
    }

    /// Past its duration at `now`. An event that never started counts as
    /// expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.start_time {
            Some(start) => now - start > self.duration_ms,
            None => true,
        }
    }

    /// Milliseconds left, clamped at zero.
    pub fn remaining_ms(&self, now: i64) -> i64 {
        match self.start_time {
            Some(start) => (self.duration_ms - (now - start)).max(0),
            None => 0,
        }
    }
}

/// The three multipliers fed to accrual. Neutral is 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub power: f64,
    pub coin: f64,
    pub efficiency: f64,
}

impl Multipliers {
    pub const NEUTRAL: Multipliers = Multipliers {
        power: 1.0,
        coin: 1.0,
        efficiency: 1.0,
    };
}

impl Default for Multipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Render view of the running event.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEventSummary {
    pub kind: EventKind,
    pub title: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
    /// Whole seconds left, rounded up.
    pub remaining_secs: i64,
}
