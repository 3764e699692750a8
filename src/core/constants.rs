use crate::economy::types::PerCurrency;

// Time
pub const MILLIS_PER_SECOND: i64 = 1000;

// Grid and levels
pub const GRID_SIZE: usize = 20;
pub const MAX_LEVEL: u32 = 20;

// Miner economy, indexed EMSX / USDT / TON
pub const STARTING_BALANCES: PerCurrency<f64> = PerCurrency::new(1000.0, 500.0, 250.0);
pub const MINER_BASE_COSTS: PerCurrency<f64> = PerCurrency::new(100.0, 150.0, 200.0);
pub const MINER_BASE_RATES: PerCurrency<f64> = PerCurrency::new(0.05, 0.03, 0.02);
pub const MINER_COST_GROWTH: f64 = 1.5;
pub const MINER_RATE_LEVEL_FACTOR: f64 = 2.0;

// Random events
pub const EVENT_COOLDOWN_MS: i64 = 5 * 60 * MILLIS_PER_SECOND;
pub const EVENT_DURATION_MS: i64 = 30 * MILLIS_PER_SECOND;
pub const POWER_SURGE_MULTIPLIER: f64 = 2.0;
pub const GOLD_RUSH_MULTIPLIER: f64 = 3.0;
pub const EFFICIENCY_BOOST_MULTIPLIER: f64 = 2.5;

// Tick driver
pub const EVENT_CHECK_INTERVAL_MS: i64 = 30 * MILLIS_PER_SECOND;
pub const SCORE_SUBMIT_INTERVAL_MS: i64 = 60 * MILLIS_PER_SECOND;
pub const AUTOSAVE_INTERVAL_MS: i64 = 30 * MILLIS_PER_SECOND;

// Leaderboard
pub const LEADERBOARD_CAPACITY: usize = 100;
pub const DEFAULT_TOP_SCORES: usize = 10;
pub const DEFAULT_PLAYER_NAME: &str = "Player";

// Persisted stores
pub const SAVE_MAGIC: u64 = 0x524E_4D5F_5853_4D45; // "EMSX_MNR" little-endian
pub const STORE_SCHEMA_VERSION: u32 = 1;
pub const ECONOMY_STORE_NAME: &str = "emsx-miner-storage";
pub const EVENTS_STORE_NAME: &str = "emsx-miner-events";
pub const ACHIEVEMENTS_STORE_NAME: &str = "emsx-miner-achievements";
pub const LEADERBOARD_STORE_NAME: &str = "emsx-miner-leaderboard";
pub const SAVE_DIR_NAME: &str = ".emsx-miner";
