//! Random timed events that multiply one earnings dimension for a short
//! window.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{template_for, EVENT_CATALOG};
pub use logic::EventEngine;
pub use types::*;
