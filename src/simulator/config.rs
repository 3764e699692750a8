//! Simulation configuration.

use std::path::PathBuf;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Simulated session length in seconds
    pub duration_secs: i64,

    /// Clock step between driver ticks, in milliseconds
    pub tick_ms: i64,

    /// Persist each run under this directory instead of in memory
    pub save_dir: Option<PathBuf>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            duration_secs: 3_600,
            tick_ms: 1_000,
            save_dir: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short sessions for a quick sanity check
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            duration_secs: 600,
            ..Default::default()
        }
    }

    /// A full day of idle play, ticked coarsely
    pub fn long_session() -> Self {
        Self {
            num_runs: 20,
            duration_secs: 24 * 3_600,
            tick_ms: 10_000,
            ..Default::default()
        }
    }

    /// Number of driver ticks in one run.
    pub fn ticks_per_run(&self) -> i64 {
        if self.tick_ms <= 0 {
            return 0;
        }
        self.duration_secs * 1_000 / self.tick_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_per_run() {
        let config = SimConfig::default();
        assert_eq!(config.ticks_per_run(), 3_600);

        let coarse = SimConfig::long_session();
        assert_eq!(coarse.ticks_per_run(), 8_640);
    }

    #[test]
    fn test_zero_tick_runs_nothing() {
        let config = SimConfig {
            tick_ms: 0,
            ..SimConfig::quick()
        };
        assert_eq!(config.ticks_per_run(), 0);
    }
}
