//! Versioned snapshot persistence for the game stores.
//!
//! Loads never fail: a missing, corrupt or foreign-version snapshot yields
//! the caller's default. Saves are fire-and-forget and only log on failure.

pub mod codec;
pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::core::constants::{
    ACHIEVEMENTS_STORE_NAME, ECONOMY_STORE_NAME, EVENTS_STORE_NAME, LEADERBOARD_STORE_NAME,
    STORE_SCHEMA_VERSION,
};
use crate::error::{PersistError, PersistResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Identity of one persisted store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub name: &'static str,
    pub version: u32,
}

pub const ECONOMY_STORE: StoreKey = StoreKey {
    name: ECONOMY_STORE_NAME,
    version: STORE_SCHEMA_VERSION,
};
pub const EVENTS_STORE: StoreKey = StoreKey {
    name: EVENTS_STORE_NAME,
    version: STORE_SCHEMA_VERSION,
};
pub const ACHIEVEMENTS_STORE: StoreKey = StoreKey {
    name: ACHIEVEMENTS_STORE_NAME,
    version: STORE_SCHEMA_VERSION,
};
pub const LEADERBOARD_STORE: StoreKey = StoreKey {
    name: LEADERBOARD_STORE_NAME,
    version: STORE_SCHEMA_VERSION,
};

/// Read and decode a store. `Ok(None)` when nothing was saved.
pub fn try_load<S, T>(storage: &S, key: StoreKey) -> PersistResult<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.read(key.name)? {
        Some(bytes) => Ok(Some(codec::decode(key.version, &bytes)?)),
        None => Ok(None),
    }
}

/// Load a store, falling back to `default()` on any miss or failure.
pub fn load_or_else<S, T, F>(storage: &S, key: StoreKey, default: F) -> T
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match try_load(storage, key) {
        Ok(Some(value)) => {
            debug!(store = key.name, "store loaded");
            value
        }
        Ok(None) => {
            debug!(store = key.name, "no saved store, using defaults");
            default()
        }
        Err(e @ PersistError::VersionMismatch { .. }) => {
            info!(store = key.name, error = %e, "discarding store from another schema version");
            default()
        }
        Err(e) => {
            warn!(store = key.name, error = %e, "failed to load store, resetting");
            default()
        }
    }
}

/// Encode and write a store.
pub fn try_save<S, T>(storage: &mut S, key: StoreKey, value: &T) -> PersistResult<()>
where
    S: Storage + ?Sized,
    T: Serialize,
{
    let bytes = codec::encode(key.version, value)?;
    storage.write(key.name, &bytes)?;
    Ok(())
}

/// Save a store; failures are logged and otherwise ignored.
pub fn save<S, T>(storage: &mut S, key: StoreKey, value: &T) -> bool
where
    S: Storage + ?Sized,
    T: Serialize,
{
    match try_save(storage, key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(store = key.name, error = %e, "failed to save store");
            false
        }
    }
}
