//! Simulation report generation.

use super::config::{SimConfig, Strategy};
use crate::core::Session;
use rand::Rng;
use serde::Serialize;

/// End-of-run numbers for one simulated session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub final_coins: u64,
    pub final_level: u32,
    pub final_enemy_level: u32,
    pub units: u32,
    pub trainings_completed: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub upgrades_bought: u32,
    pub training_speed: f64,
    pub battle_rewards: f64,
    pub training_slots: u32,
}

impl RunStats {
    pub fn from_session<R: Rng>(session: &Session<R>) -> Self {
        let state = session.state();
        let stats = session.stats();
        Self {
            final_coins: state.economy.coins,
            final_level: state.economy.level,
            final_enemy_level: state.economy.enemy_level,
            units: state.units.len() as u32,
            trainings_completed: stats.trainings_completed,
            battles_won: stats.battles_won,
            battles_lost: stats.battles_lost,
            upgrades_bought: stats.upgrades_bought,
            training_speed: state.upgrades.training_speed,
            battle_rewards: state.upgrades.battle_rewards,
            training_slots: state.upgrades.training_slots,
        }
    }

    pub fn win_rate(&self) -> f64 {
        let battles = self.battles_won + self.battles_lost;
        if battles == 0 {
            0.0
        } else {
            self.battles_won as f64 / battles as f64
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub strategy: Strategy,
    pub hours: f64,

    // Aggregated stats
    pub avg_final_coins: f64,
    pub avg_final_level: f64,
    pub avg_final_enemy_level: f64,
    pub avg_units: f64,
    pub avg_trainings_completed: f64,
    pub avg_battles_won: f64,
    pub avg_battles_lost: f64,
    pub avg_upgrades_bought: f64,
    pub avg_win_rate: f64,
    pub max_enemy_level: u32,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        Self {
            num_runs: runs.len() as u32,
            strategy: config.strategy,
            hours: config.hours,
            avg_final_coins: average(&runs, |r| r.final_coins as f64),
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_final_enemy_level: average(&runs, |r| r.final_enemy_level as f64),
            avg_units: average(&runs, |r| r.units as f64),
            avg_trainings_completed: average(&runs, |r| r.trainings_completed as f64),
            avg_battles_won: average(&runs, |r| r.battles_won as f64),
            avg_battles_lost: average(&runs, |r| r.battles_lost as f64),
            avg_upgrades_bought: average(&runs, |r| r.upgrades_bought as f64),
            avg_win_rate: average(&runs, RunStats::win_rate),
            max_enemy_level: runs.iter().map(|r| r.final_enemy_level).max().unwrap_or(0),
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
            "Runs: {}, strategy: {}, {:.1} hours each\n\n",
            self.num_runs, self.strategy, self.hours
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Coins:     {:.0}\n", self.avg_final_coins));
        report.push_str(&format!("  Avg Player Level:    {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Upgrades Bought: {:.1}\n\n", self.avg_upgrades_bought));

        report.push_str("── ROSTER ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Units:           {:.1}\n", self.avg_units));
        report.push_str(&format!(
            "  Avg Trainings:       {:.0}\n\n",
            self.avg_trainings_completed
        ));

        report.push_str("── BATTLE ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Enemy Level:     {:.1} (max {})\n",
            self.avg_final_enemy_level, self.max_enemy_level
        ));
        report.push_str(&format!("  Avg Wins:            {:.0}\n", self.avg_battles_won));
        report.push_str(&format!("  Avg Losses:          {:.0}\n", self.avg_battles_lost));
        report.push_str(&format!(
            "  Avg Win Rate:        {:.1}%\n\n",
            self.avg_win_rate * 100.0
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.avg_win_rate > 0.95 {
            report.push_str("  ⚠️  Almost never losing - opponent scaling too slow?\n");
        } else if self.avg_win_rate < 0.3 {
            report.push_str("  ⚠️  Mostly losing - training can't keep up with the opponent\n");
        } else {
            report.push_str("  Win rate looks healthy\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(coins: u64, won: u32, lost: u32) -> RunStats {
        RunStats {
            final_coins: coins,
            final_level: 3,
            final_enemy_level: 4,
            units: 2,
            trainings_completed: 10,
            battles_won: won,
            battles_lost: lost,
            upgrades_bought: 0,
            training_speed: 1.0,
            battle_rewards: 1.0,
            training_slots: 3,
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![run(1_000, 3, 1), run(2_000, 1, 3)];
        let report = SimReport::from_runs(&SimConfig::default(), runs);
        assert_eq!(report.num_runs, 2);
        assert!((report.avg_final_coins - 1_500.0).abs() < 0.1);
        assert!((report.avg_win_rate - 0.5).abs() < 1e-9);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }

    #[test]
    fn test_json_report() {
        let report = SimReport::from_runs(&SimConfig::default(), vec![run(10, 0, 0)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["strategy"], "idle");
        assert_eq!(json["run_stats"][0]["final_coins"], 10);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(&SimConfig::default(), vec![]);
        assert_eq!(report.avg_final_coins, 0.0);
        assert_eq!(report.max_enemy_level, 0);
    }
}
