//! Unit data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a recruited unit.
pub type UnitId = Uuid;

/// Lifecycle status of a unit.
///
/// Legal transitions are Idle -> Training -> Idle and Idle -> Battling -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitStatus {
    #[default]
    Idle,
    Training,
    Battling,
}

impl UnitStatus {
    /// Short label for UI
    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::Idle => "IDLE",
            UnitStatus::Training => "TRAINING",
            UnitStatus::Battling => "BATTLE",
        }
    }
}

/// A triple of combat stats, used both for base rolls and training growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl Stats {
    pub fn new(attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }

    pub fn total(&self) -> u64 {
        self.attack as u64 + self.defense as u64 + self.speed as u64
    }
}

/// A recruited hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub status: UnitStatus,
    /// Fraction in [0, 1]; only meaningful while training
    #[serde(default)]
    pub training_progress: f64,
    /// Accumulated from training and victories; nothing consumes it yet
    #[serde(default)]
    pub experience: u64,
}

impl Unit {
    /// Creates a fresh level 1 idle unit.
    pub fn new(id: UnitId, name: String, stats: Stats) -> Self {
        Self {
            id,
            name,
            level: 1,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            status: UnitStatus::Idle,
            training_progress: 0.0,
            experience: 0,
        }
    }

    /// Battle power: attack + defense + speed.
    pub fn power(&self) -> u64 {
        self.stats().total()
    }

    pub fn stats(&self) -> Stats {
        Stats::new(self.attack, self.defense, self.speed)
    }

    pub fn is_idle(&self) -> bool {
        self.status == UnitStatus::Idle
    }

    pub fn grow(&mut self, growth: Stats) {
        self.attack += growth.attack;
        self.defense += growth.defense;
        self.speed += growth.speed;
    }
}
