//! Events produced while the session advances or handles an action.
//!
//! The presentation layer maps these to log lines and sounds; the
//! simulation never touches UI types directly.

use super::economy::UpgradeKind;
use crate::units::UnitId;

/// A single thing that happened in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Roster ──────────────────────────────────────────────────
    /// A unit joined the roster.
    UnitRecruited { unit_id: UnitId, name: String },

    // ── Training ────────────────────────────────────────────────
    /// A unit entered a training slot.
    TrainingStarted {
        unit_id: UnitId,
        name: String,
        slot: usize,
    },

    /// A unit finished training and leveled up.
    TrainingCompleted {
        unit_id: UnitId,
        name: String,
        new_level: u32,
        coins: u64,
    },

    // ── Battle ──────────────────────────────────────────────────
    /// A unit was sent against the opponent.
    BattleStarted {
        unit_id: UnitId,
        name: String,
        enemy_level: u32,
        duration_ms: i64,
    },

    /// The encounter was won.
    BattleWon {
        unit_id: UnitId,
        name: String,
        reward: u64,
        enemy_leveled_up: bool,
    },

    /// The encounter was lost.
    BattleLost { unit_id: UnitId, name: String },

    // ── Economy ─────────────────────────────────────────────────
    /// An upgrade was bought.
    UpgradePurchased { kind: UpgradeKind, cost: u64 },

    /// Player leveled up (may repeat within one step).
    LeveledUp { new_level: u32 },

    // ── Automation ──────────────────────────────────────────────
    AutoBattleToggled { enabled: bool },
    AutoTrainerToggled { enabled: bool },
}

impl TickEvent {
    /// One-line description for the activity log.
    pub fn message(&self) -> String {
        match self {
            TickEvent::UnitRecruited { name, .. } => format!("{} joined the roster", name),
            TickEvent::TrainingStarted { name, slot, .. } => {
                format!("{} started training in slot {}", name, slot + 1)
            }
            TickEvent::TrainingCompleted {
                name,
                new_level,
                coins,
                ..
            } => format!("{} reached Lv.{} (+{} coins)", name, new_level, coins),
            TickEvent::BattleStarted {
                name, enemy_level, ..
            } => format!("{} engages a Lv.{} enemy", name, enemy_level),
            TickEvent::BattleWon {
                name,
                reward,
                enemy_leveled_up,
                ..
            } => {
                if *enemy_leveled_up {
                    format!("{} won! +{} coins. The enemy grows stronger", name, reward)
                } else {
                    format!("{} won! +{} coins", name, reward)
                }
            }
            TickEvent::BattleLost { name, .. } => format!("{} was defeated", name),
            TickEvent::UpgradePurchased { kind, cost } => {
                format!("Bought {} for {} coins", kind.name(), cost)
            }
            TickEvent::LeveledUp { new_level } => format!("Player reached level {}", new_level),
            TickEvent::AutoBattleToggled { enabled } => {
                format!("Auto Battle: {}", on_off(*enabled))
            }
            TickEvent::AutoTrainerToggled { enabled } => {
                format!("Auto Trainer: {}", on_off(*enabled))
            }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}

/// Result of advancing the session to a point in time.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events emitted since the previous drain, in order
    pub events: Vec<TickEvent>,

    /// Scheduled tasks that ran during this advance
    pub tasks_run: u32,
}
