//! Simulation report generation.

use super::runner::RunStats;
use crate::achievements::{get_achievement_def, ALL_ACHIEVEMENTS};
use crate::economy::{Currency, PerCurrency};
use serde::Serialize;

/// How often and how early one achievement unlocked across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementStat {
    pub name: &'static str,
    pub runs_unlocked: u32,
    /// Mean seconds into the session, over the runs that unlocked it.
    pub avg_unlock_secs: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub duration_secs: i64,

    pub avg_final_balances: PerCurrency<f64>,
    pub avg_final_miners: f64,
    pub avg_highest_level: f64,
    pub max_highest_level: u32,
    pub avg_purchases: f64,
    pub avg_merges: f64,
    pub avg_events_started: f64,

    pub achievements: Vec<AchievementStat>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, duration_secs: i64) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = f64::from(num_runs.max(1));
        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;

        let avg_final_balances = PerCurrency::new(
            avg(&|r| r.final_balances[Currency::Emsx]),
            avg(&|r| r.final_balances[Currency::Usdt]),
            avg(&|r| r.final_balances[Currency::Ton]),
        );

        let achievements = ALL_ACHIEVEMENTS
            .iter()
            .map(|def| {
                let times: Vec<f64> = runs
                    .iter()
                    .filter_map(|r| {
                        r.achievement_unlocks
                            .iter()
                            .find(|(id, _)| *id == def.id)
                            .map(|(_, secs)| *secs)
                    })
                    .collect();
                AchievementStat {
                    name: get_achievement_def(def.id).name,
                    runs_unlocked: times.len() as u32,
                    avg_unlock_secs: if times.is_empty() {
                        0.0
                    } else {
                        times.iter().sum::<f64>() / times.len() as f64
                    },
                }
            })
            .collect();

        let avg_final_miners = avg(&|r| r.final_miners as f64);
        let avg_highest_level = avg(&|r| f64::from(r.highest_level));
        let avg_purchases = avg(&|r| f64::from(r.purchases));
        let avg_merges = avg(&|r| f64::from(r.merges));
        let avg_events_started = avg(&|r| f64::from(r.events_started));
        let max_highest_level = runs.iter().map(|r| r.highest_level).max().unwrap_or(0);

        Self {
            num_runs,
            duration_secs,
            avg_final_balances,
            avg_final_miners,
            avg_highest_level,
            max_highest_level,
            avg_purchases,
            avg_merges,
            avg_events_started,
            achievements,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {}s sessions\n\n",
            self.num_runs, self.duration_secs
        ));

        report.push_str("── BALANCES ─────────────────────────────────────────────────────\n");
        for (currency, balance) in self.avg_final_balances.iter() {
            report.push_str(&format!("  Avg Final {:<5}     {:.2}\n", currency.code(), balance));
        }
        report.push('\n');

        report.push_str("── MINERS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Miners:   {:.1}\n", self.avg_final_miners));
        report.push_str(&format!("  Avg Highest Level:  {:.1}\n", self.avg_highest_level));
        report.push_str(&format!("  Max Highest Level:  {}\n", self.max_highest_level));
        report.push_str(&format!("  Avg Purchases:      {:.1}\n", self.avg_purchases));
        report.push_str(&format!("  Avg Merges:         {:.1}\n\n", self.avg_merges));

        report.push_str("── EVENTS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Events Started: {:.1}\n\n", self.avg_events_started));

        report.push_str("── ACHIEVEMENTS ─────────────────────────────────────────────────\n");
        for stat in &self.achievements {
            let pct = if self.num_runs == 0 {
                0.0
            } else {
                f64::from(stat.runs_unlocked) / f64::from(self.num_runs) * 100.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:<15} {:>5.1}% avg {:>8.0}s {}\n",
                stat.name, pct, stat.avg_unlock_secs, bar
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
