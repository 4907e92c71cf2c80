//! Unit registry operations.

use super::generation::generate_unit;
use super::types::{Unit, UnitId};
use crate::core::constants::RECRUIT_COST;
use crate::core::game_state::GameState;
use crate::error::{ActionError, ActionResult};
use rand::Rng;

/// Recruits a new level 1 unit for 500 coins.
/// Returns the new unit's id, or declines with no change when short of coins.
pub fn recruit<R: Rng>(state: &mut GameState, rng: &mut R) -> ActionResult<UnitId> {
    state.economy.spend(RECRUIT_COST)?;
    let unit = generate_unit(rng);
    let id = unit.id;
    state.units.push(unit);
    Ok(id)
}

pub fn find_by_id(state: &GameState, id: UnitId) -> Option<&Unit> {
    state.unit(id)
}

/// Looks up a unit that must currently be idle.
pub fn require_idle(state: &GameState, id: UnitId) -> ActionResult<&Unit> {
    let unit = state.unit(id).ok_or(ActionError::UnitNotFound)?;
    if !unit.is_idle() {
        return Err(ActionError::UnitNotIdle);
    }
    Ok(unit)
}
