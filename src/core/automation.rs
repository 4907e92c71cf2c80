//! Unattended training scheduler.
//!
//! Auto-battle has no pass of its own: the session re-queues a battle after
//! each victory while the setting is on.

use super::clock::Timestamp;
use super::game_state::GameState;
use crate::training::{start_training, TrainingAssignment};
use crate::units::UnitId;

/// Idle units (registry order) that would fill the currently free slots.
pub fn auto_train_candidates(state: &GameState) -> Vec<UnitId> {
    let available = state.available_slots();
    state.idle_units().take(available).map(|u| u.id).collect()
}

/// One auto-trainer pass. Returns the assignments made, or `None` when the
/// trainer is off, every slot is busy, or no unit is idle.
pub fn auto_train_pass(state: &mut GameState, now: Timestamp) -> Option<Vec<TrainingAssignment>> {
    if !state.settings.auto_trainer {
        return None;
    }
    let candidates = auto_train_candidates(state);
    if candidates.is_empty() {
        return None;
    }
    start_training(state, &candidates, now).ok()
}
