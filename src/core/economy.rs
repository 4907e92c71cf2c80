//! Currency, player progression and upgrade pricing.

use super::constants::*;
use super::game_state::GameState;
use crate::error::{ActionError, ActionResult};
use crate::training::TrainingSlot;
use serde::{Deserialize, Serialize};

/// Player-wide currencies and progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Economy {
    pub coins: u64,
    /// Reserved currency, nothing spends or awards it yet
    pub gems: u64,
    pub exp: u64,
    pub level: u32,
    /// Opponent scaling counter; only ever increases
    pub enemy_level: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            gems: STARTING_GEMS,
            exp: 0,
            level: 1,
            enemy_level: 1,
        }
    }
}

impl Economy {
    pub fn can_afford(&self, cost: u64) -> bool {
        self.coins >= cost
    }

    /// Deducts `cost`, or declines without touching coins.
    pub fn spend(&mut self, cost: u64) -> ActionResult<()> {
        if !self.can_afford(cost) {
            return Err(ActionError::InsufficientFunds {
                cost,
                available: self.coins,
            });
        }
        self.coins -= cost;
        Ok(())
    }

    pub fn award(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Exp needed to leave the current level.
    pub fn required_exp(&self) -> u64 {
        self.level as u64 * EXP_PER_LEVEL
    }

    /// Adds player exp and applies any level-ups. Returns levels gained.
    pub fn gain_exp(&mut self, amount: u64) -> u32 {
        self.exp = self.exp.saturating_add(amount);
        self.check_level_up()
    }

    /// Consumes exp in whole-level chunks; handles multi-level jumps.
    pub fn check_level_up(&mut self) -> u32 {
        let mut levels_gained = 0;
        loop {
            let required = self.required_exp();
            if self.exp < required {
                break;
            }
            self.exp -= required;
            self.level += 1;
            levels_gained += 1;
        }
        levels_gained
    }
}

/// Purchased multipliers and capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upgrades {
    pub training_speed: f64,
    pub battle_rewards: f64,
    pub training_slots: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            training_speed: 1.0,
            battle_rewards: 1.0,
            training_slots: STARTING_TRAINING_SLOTS,
        }
    }
}

/// Automation toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auto_battle: bool,
    pub auto_trainer: bool,
}

/// The three purchasable upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    TrainingSpeed,
    BattleRewards,
    TrainingSlots,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::TrainingSpeed,
        UpgradeKind::BattleRewards,
        UpgradeKind::TrainingSlots,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::TrainingSpeed => "Training Speed",
            UpgradeKind::BattleRewards => "Battle Rewards",
            UpgradeKind::TrainingSlots => "Training Slots",
        }
    }

    /// Parses the short action names `training`, `rewards` and `slots`.
    pub fn from_action_name(name: &str) -> Option<Self> {
        match name {
            "training" => Some(UpgradeKind::TrainingSpeed),
            "rewards" => Some(UpgradeKind::BattleRewards),
            "slots" => Some(UpgradeKind::TrainingSlots),
            _ => None,
        }
    }

    /// Current price of the next level of this upgrade.
    pub fn cost(&self, upgrades: &Upgrades) -> u64 {
        let (base, growth, exponent) = match self {
            UpgradeKind::TrainingSpeed => (
                TRAINING_SPEED_BASE_COST,
                TRAINING_SPEED_COST_GROWTH,
                upgrades.training_speed - 1.0,
            ),
            UpgradeKind::BattleRewards => (
                BATTLE_REWARDS_BASE_COST,
                BATTLE_REWARDS_COST_GROWTH,
                upgrades.battle_rewards - 1.0,
            ),
            UpgradeKind::TrainingSlots => (
                TRAINING_SLOTS_BASE_COST,
                TRAINING_SLOTS_COST_GROWTH,
                upgrades.training_slots as f64 - STARTING_TRAINING_SLOTS as f64,
            ),
        };
        upgrade_cost(base, growth, exponent)
    }

    /// True when the upgrade can never be bought again.
    pub fn is_maxed(&self, upgrades: &Upgrades) -> bool {
        matches!(self, UpgradeKind::TrainingSlots) && upgrades.training_slots >= MAX_TRAINING_SLOTS
    }
}

/// floor(base * growth^exponent)
pub fn upgrade_cost(base: f64, growth: f64, exponent: f64) -> u64 {
    (base * growth.powf(exponent)).floor() as u64
}

/// Buys one level of `kind`. Returns the price paid.
///
/// Declined purchases leave coins and every upgrade field untouched.
pub fn buy_upgrade(state: &mut GameState, kind: UpgradeKind) -> ActionResult<u64> {
    if kind.is_maxed(&state.upgrades) {
        return Err(ActionError::SlotCapReached(MAX_TRAINING_SLOTS));
    }
    let cost = kind.cost(&state.upgrades);
    state.economy.spend(cost)?;

    match kind {
        UpgradeKind::TrainingSpeed => state.upgrades.training_speed += TRAINING_SPEED_STEP,
        UpgradeKind::BattleRewards => state.upgrades.battle_rewards += BATTLE_REWARDS_STEP,
        UpgradeKind::TrainingSlots => {
            state.upgrades.training_slots += 1;
            state.training_slots.push(TrainingSlot::Empty);
        }
    }
    Ok(cost)
}
