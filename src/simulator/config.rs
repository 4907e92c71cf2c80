//! Simulation configuration.

use crate::config::SessionConfig;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the simulated player behaves between automation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Automation only; the player just restarts battling after a defeat
    Idle,
    /// Automation plus recruiting and upgrading whenever affordable
    Greedy,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Strategy::Idle),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(format!("unknown strategy '{}' (expected idle or greedy)", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Idle => write!(f, "idle"),
            Strategy::Greedy => write!(f, "greedy"),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Virtual play time per run
    pub hours: f64,

    pub strategy: Strategy,

    /// How often the simulated player looks at the game
    pub step_ms: i64,

    /// Heroes recruited with the starting coins
    pub opening_recruits: u32,

    /// Timer periods passed to every session
    pub session: SessionConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            hours: 8.0,
            strategy: Strategy::Idle,
            step_ms: 1_000,
            opening_recruits: 2,
            session: SessionConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    pub fn duration_ms(&self) -> i64 {
        (self.hours * 3_600_000.0) as i64
    }

    /// Small config for tests and quick balance checks
    pub fn quick(strategy: Strategy) -> Self {
        Self {
            num_runs: 5,
            seed: Some(1),
            hours: 0.5,
            strategy,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("idle".parse::<Strategy>(), Ok(Strategy::Idle));
        assert_eq!("Greedy".parse::<Strategy>(), Ok(Strategy::Greedy));
        assert!("lazy".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Greedy.to_string(), "greedy");
    }

    #[test]
    fn test_duration() {
        let config = SimConfig {
            hours: 1.5,
            ..Default::default()
        };
        assert_eq!(config.duration_ms(), 5_400_000);
    }
}
