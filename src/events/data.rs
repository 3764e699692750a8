//! Static event catalog.

use super::types::{EventKind, EventTemplate};
use crate::core::constants::{
    EFFICIENCY_BOOST_MULTIPLIER, EVENT_DURATION_MS, GOLD_RUSH_MULTIPLIER, POWER_SURGE_MULTIPLIER,
};

/// Every event a random roll can pick, uniformly.
pub const EVENT_CATALOG: &[EventTemplate] = &[
    EventTemplate {
        kind: EventKind::PowerBoost,
        multiplier: POWER_SURGE_MULTIPLIER,
        duration_ms: EVENT_DURATION_MS,
    },
    EventTemplate {
        kind: EventKind::CoinRush,
        multiplier: GOLD_RUSH_MULTIPLIER,
        duration_ms: EVENT_DURATION_MS,
    },
    EventTemplate {
        kind: EventKind::Efficiency,
        multiplier: EFFICIENCY_BOOST_MULTIPLIER,
        duration_ms: EVENT_DURATION_MS,
    },
];

pub fn template_for(kind: EventKind) -> Option<&'static EventTemplate> {
    EVENT_CATALOG.iter().find(|t| t.kind == kind)
}
