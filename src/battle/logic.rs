//! Encounter start and resolution against the scaling opponent.

use super::types::{BattleOutcome, Encounter};
use crate::core::clock::Timestamp;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::error::{ActionError, ActionResult};
use crate::units::{UnitId, UnitStatus};
use rand::Rng;
use std::cmp::Reverse;

pub fn enemy_power(enemy_level: u32) -> u64 {
    enemy_level as u64 * ENEMY_POWER_PER_LEVEL
}

/// max(2000, 5000 - (hero - enemy) * 10): stronger heroes finish faster.
pub fn battle_duration_ms(hero_power: u64, enemy_power: u64) -> i64 {
    let advantage = hero_power as i64 - enemy_power as i64;
    (BATTLE_BASE_DURATION_MS - advantage * BATTLE_MS_PER_POWER).max(BATTLE_MIN_DURATION_MS)
}

/// Victory when hero power is strictly above 80% of enemy power.
pub fn is_victory(hero_power: u64, enemy_power: u64) -> bool {
    hero_power * VICTORY_MARGIN_DENOMINATOR > enemy_power * VICTORY_MARGIN_NUMERATOR
}

/// floor(enemy_level * 100 * battle_rewards)
pub fn victory_reward(enemy_level: u32, battle_rewards: f64) -> u64 {
    (enemy_level as f64 * BATTLE_REWARD_PER_ENEMY_LEVEL * battle_rewards).floor() as u64
}

/// 30% chance the opponent grows stronger after a victory.
pub fn roll_enemy_scaling<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(ENEMY_LEVEL_UP_CHANCE)
}

/// Strongest idle unit; the earliest recruited wins ties.
pub fn pick_champion(state: &GameState) -> Option<UnitId> {
    state
        .idle_units()
        .min_by_key(|u| Reverse(u.power()))
        .map(|u| u.id)
}

/// Sends the strongest idle unit into an encounter starting at `now`.
///
/// Declines when an encounter is already running or no unit is idle.
pub fn start_battle(
    state: &mut GameState,
    in_progress: Option<&Encounter>,
    now: Timestamp,
) -> ActionResult<Encounter> {
    if in_progress.is_some() {
        return Err(ActionError::EncounterInProgress);
    }
    let unit_id = pick_champion(state).ok_or(ActionError::NoIdleUnit)?;
    let enemy_level = state.economy.enemy_level;
    let unit = state.unit_mut(unit_id).ok_or(ActionError::UnitNotFound)?;
    unit.status = UnitStatus::Battling;

    Ok(Encounter {
        unit_id,
        started_at: now,
        duration_ms: battle_duration_ms(unit.power(), enemy_power(enemy_level)),
        enemy_level,
    })
}

/// Resolves `encounter` and returns its unit to idle.
///
/// On victory the player earns the scaled reward and exp, the unit earns
/// experience, and the opponent levels up if `enemy_scales` is set. Defeat
/// pays nothing and leaves the opponent unchanged.
pub fn complete_battle(
    state: &mut GameState,
    encounter: &Encounter,
    enemy_scales: bool,
) -> Option<BattleOutcome> {
    let enemy_level = state.economy.enemy_level;
    let enemy_power = enemy_power(enemy_level);

    let unit = state.unit_mut(encounter.unit_id)?;
    unit.status = UnitStatus::Idle;
    let hero_power = unit.power();
    let victory = is_victory(hero_power, enemy_power);

    let mut reward = 0;
    let mut enemy_leveled_up = false;
    if victory {
        unit.experience += enemy_level as u64 * BATTLE_UNIT_EXP_PER_ENEMY_LEVEL;
        reward = victory_reward(enemy_level, state.upgrades.battle_rewards);
        state.economy.award(reward);
        state.economy.exp += enemy_level as u64 * BATTLE_PLAYER_EXP_PER_ENEMY_LEVEL;
        if enemy_scales {
            state.economy.enemy_level += 1;
            enemy_leveled_up = true;
        }
    }
    let player_levels_gained = state.economy.check_level_up();

    Some(BattleOutcome {
        unit_id: encounter.unit_id,
        victory,
        hero_power,
        enemy_power,
        reward,
        enemy_leveled_up,
        player_levels_gained,
    })
}
