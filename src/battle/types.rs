//! Encounter data structures.

use crate::core::clock::Timestamp;
use crate::units::UnitId;

/// The single in-flight encounter. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encounter {
    pub unit_id: UnitId,
    pub started_at: Timestamp,
    pub duration_ms: i64,
    pub enemy_level: u32,
}

impl Encounter {
    pub fn ends_at(&self) -> Timestamp {
        self.started_at + self.duration_ms
    }

    /// Elapsed fraction in [0, 1], for progress bars.
    pub fn progress(&self, now: Timestamp) -> f64 {
        if self.duration_ms <= 0 {
            return 1.0;
        }
        ((now - self.started_at).max(0) as f64 / self.duration_ms as f64).min(1.0)
    }
}

/// Result of a resolved encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub unit_id: UnitId,
    pub victory: bool,
    pub hero_power: u64,
    pub enemy_power: u64,
    /// Coins awarded; zero on defeat
    pub reward: u64,
    pub enemy_leveled_up: bool,
    pub player_levels_gained: u32,
}
