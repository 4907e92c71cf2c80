//! Slot assignment, time-based progress and training payouts.
//!
//! Progress is recomputed from the slot's start time on every advance rather
//! than accumulated per tick, so missed ticks, uneven tick rates and reloads
//! after a long absence all land on the same result.

use super::types::{TrainingAssignment, TrainingCompletion, TrainingSlot};
use crate::core::clock::Timestamp;
use crate::core::constants::{
    BASE_TRAINING_DURATION_MS, TRAINING_COINS_PER_LEVEL, TRAINING_PLAYER_EXP,
    TRAINING_UNIT_EXPERIENCE,
};
use crate::core::game_state::GameState;
use crate::error::{ActionError, ActionResult};
use crate::units::generation::roll_stat_growth;
use crate::units::{Stats, UnitId, UnitStatus};
use rand::Rng;

/// Milliseconds one training session takes at the given speed multiplier.
pub fn training_duration_ms(training_speed: f64) -> f64 {
    BASE_TRAINING_DURATION_MS / training_speed
}

/// min(elapsed / duration, 1), with negative elapsed time treated as zero.
pub fn training_progress(elapsed_ms: i64, training_speed: f64) -> f64 {
    let elapsed = elapsed_ms.max(0) as f64;
    (elapsed / training_duration_ms(training_speed)).min(1.0)
}

/// First empty slot at or after `cursor` and below `capacity`.
pub fn find_free_slot(slots: &[TrainingSlot], capacity: usize, cursor: usize) -> Option<usize> {
    let end = capacity.min(slots.len());
    (cursor..end).find(|&i| !slots[i].is_occupied())
}

/// Pairs candidates with free slots in order. Candidates beyond the free
/// capacity are dropped.
pub fn plan_assignments(
    slots: &[TrainingSlot],
    capacity: usize,
    candidates: &[UnitId],
) -> Vec<TrainingAssignment> {
    let mut plan = Vec::with_capacity(candidates.len());
    let mut cursor = 0;
    for &unit_id in candidates {
        let Some(slot) = find_free_slot(slots, capacity, cursor) else {
            break;
        };
        plan.push(TrainingAssignment { slot, unit_id });
        cursor = slot + 1;
    }
    plan
}

/// Moves the selected idle units into free slots, starting the clock at `now`.
///
/// Ids that are unknown, duplicated or not idle are skipped. Declines without
/// mutating anything when no selected unit is eligible or no slot is free.
pub fn start_training(
    state: &mut GameState,
    selected: &[UnitId],
    now: Timestamp,
) -> ActionResult<Vec<TrainingAssignment>> {
    let mut candidates: Vec<UnitId> = Vec::with_capacity(selected.len());
    for &id in selected {
        let eligible = state.unit(id).is_some_and(|u| u.is_idle());
        if eligible && !candidates.contains(&id) {
            candidates.push(id);
        }
    }
    if candidates.is_empty() {
        return Err(ActionError::NothingSelected);
    }

    let capacity = state.upgrades.training_slots as usize;
    let plan = plan_assignments(&state.training_slots, capacity, &candidates);
    if plan.is_empty() {
        return Err(ActionError::NoFreeSlot);
    }

    for assignment in &plan {
        if let Some(unit) = state.unit_mut(assignment.unit_id) {
            unit.status = UnitStatus::Training;
            unit.training_progress = 0.0;
        }
        state.training_slots[assignment.slot] = TrainingSlot::Occupied {
            unit_id: assignment.unit_id,
            started_at: now,
        };
    }
    Ok(plan)
}

/// Recomputes progress for every occupied slot and completes finished ones.
///
/// A slot freed here is not refilled until the next `start_training`.
pub fn advance<R: Rng>(state: &mut GameState, now: Timestamp, rng: &mut R) -> Vec<TrainingCompletion> {
    let speed = state.upgrades.training_speed;
    let mut completions = Vec::new();

    for slot_index in 0..state.training_slots.len() {
        let TrainingSlot::Occupied {
            unit_id,
            started_at,
        } = state.training_slots[slot_index]
        else {
            continue;
        };

        let progress = training_progress(now - started_at, speed);
        let Some(unit) = state.unit_mut(unit_id) else {
            state.training_slots[slot_index] = TrainingSlot::Empty;
            continue;
        };
        unit.training_progress = progress;

        if progress >= 1.0 {
            let growth = roll_stat_growth(rng);
            if let Some(mut completion) = complete_training(state, unit_id, growth) {
                completion.slot = slot_index;
                completions.push(completion);
            }
            state.training_slots[slot_index] = TrainingSlot::Empty;
        }
    }
    completions
}

/// Applies a finished training session to `unit_id` with the given stat growth.
///
/// The unit gains a level, the growth and 50 experience and returns to idle.
/// The player receives `new_level * 25` coins and 25 exp.
pub fn complete_training(
    state: &mut GameState,
    unit_id: UnitId,
    growth: Stats,
) -> Option<TrainingCompletion> {
    let unit = state.unit_mut(unit_id)?;
    unit.level += 1;
    unit.grow(growth);
    unit.status = UnitStatus::Idle;
    unit.training_progress = 0.0;
    unit.experience += TRAINING_UNIT_EXPERIENCE;
    let new_level = unit.level;

    let coins_awarded = new_level as u64 * TRAINING_COINS_PER_LEVEL;
    state.economy.award(coins_awarded);
    let player_levels_gained = state.economy.gain_exp(TRAINING_PLAYER_EXP);

    Some(TrainingCompletion {
        slot: 0,
        unit_id,
        new_level,
        coins_awarded,
        player_levels_gained,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Stats, Unit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn state_with_units(count: u128) -> (GameState, Vec<UnitId>) {
        let mut state = GameState::new();
        let mut ids = Vec::new();
        for n in 1..=count {
            let id = Uuid::from_u128(n);
            state
                .units
                .push(Unit::new(id, format!("Unit {}", n), Stats::new(10, 10, 10)));
            ids.push(id);
        }
        (state, ids)
    }

    #[test]
    fn test_progress_formula() {
        assert_eq!(training_progress(0, 1.0), 0.0);
        assert!((training_progress(2_500, 1.0) - 0.25).abs() < 1e-12);
        assert!((training_progress(5_000, 2.0) - 1.0).abs() < 1e-12);
        assert_eq!(training_progress(60_000, 1.0), 1.0);
        assert_eq!(training_progress(-500, 1.0), 0.0);
    }

    #[test]
    fn test_find_free_slot_respects_cursor_and_capacity() {
        let occupied = TrainingSlot::Occupied {
            unit_id: Uuid::nil(),
            started_at: 0,
        };
        let slots = [occupied, TrainingSlot::Empty, occupied, TrainingSlot::Empty];
        assert_eq!(find_free_slot(&slots, 4, 0), Some(1));
        assert_eq!(find_free_slot(&slots, 4, 2), Some(3));
        assert_eq!(find_free_slot(&slots, 3, 2), None);
        assert_eq!(find_free_slot(&slots, 10, 4), None);
    }

    #[test]
    fn test_plan_drops_overflow() {
        let slots = [TrainingSlot::Empty; 3];
        let ids: Vec<UnitId> = (1..=5).map(Uuid::from_u128).collect();
        let plan = plan_assignments(&slots, 3, &ids);
        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.iter().map(|a| a.slot).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(plan[2].unit_id, ids[2]);
    }

    #[test]
    fn test_start_training_assigns_in_order() {
        let (mut state, ids) = state_with_units(2);
        let plan = start_training(&mut state, &ids, 1_000).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(
            state.training_slots[0],
            TrainingSlot::Occupied {
                unit_id: ids[0],
                started_at: 1_000
            }
        );
        assert_eq!(state.units[1].status, UnitStatus::Training);
        assert_eq!(state.training_slots[2], TrainingSlot::Empty);
    }

    #[test]
    fn test_start_training_skips_non_idle_and_duplicates() {
        let (mut state, ids) = state_with_units(3);
        state.units[0].status = UnitStatus::Battling;
        let selected = vec![ids[0], ids[1], ids[1], ids[2]];
        let plan = start_training(&mut state, &selected, 0).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(state.units[0].status, UnitStatus::Battling);
        assert_eq!(state.training_slots[0].unit_id(), Some(ids[1]));
        assert_eq!(state.training_slots[1].unit_id(), Some(ids[2]));
    }

    #[test]
    fn test_start_training_with_no_free_slot_declines() {
        let (mut state, ids) = state_with_units(4);
        start_training(&mut state, &ids[..3], 0).unwrap();
        let before = state.clone();
        assert_eq!(
            start_training(&mut state, &ids[3..], 0),
            Err(ActionError::NoFreeSlot)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_advance_updates_progress_then_completes_once() {
        let (mut state, ids) = state_with_units(1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        start_training(&mut state, &ids, 0).unwrap();

        assert!(advance(&mut state, 4_000, &mut rng).is_empty());
        assert!((state.units[0].training_progress - 0.4).abs() < 1e-12);

        let done = advance(&mut state, 10_000, &mut rng);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].new_level, 2);
        assert_eq!(done[0].coins_awarded, 50);
        assert_eq!(state.training_slots[0], TrainingSlot::Empty);
        assert_eq!(state.units[0].status, UnitStatus::Idle);
        assert_eq!(state.units[0].training_progress, 0.0);

        assert!(advance(&mut state, 20_000, &mut rng).is_empty());
        assert_eq!(state.units[0].level, 2);
    }

    #[test]
    fn test_advance_honours_training_speed() {
        let (mut state, ids) = state_with_units(1);
        state.upgrades.training_speed = 2.0;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        start_training(&mut state, &ids, 0).unwrap();
        assert!(advance(&mut state, 4_999, &mut rng).is_empty());
        assert_eq!(advance(&mut state, 5_000, &mut rng).len(), 1);
    }

    #[test]
    fn test_complete_training_payout() {
        let (mut state, ids) = state_with_units(1);
        state.economy.exp = 90;
        state.units[0].status = UnitStatus::Training;
        let coins = state.economy.coins;

        let done = complete_training(&mut state, ids[0], Stats::new(2, 4, 6)).unwrap();
        let unit = &state.units[0];
        assert_eq!(unit.level, 2);
        assert_eq!(unit.stats(), Stats::new(12, 14, 16));
        assert_eq!(unit.experience, 50);
        assert_eq!(unit.status, UnitStatus::Idle);
        assert_eq!(state.economy.coins, coins + 50);
        assert_eq!(state.economy.level, 2);
        assert_eq!(state.economy.exp, 15);
        assert_eq!(done.player_levels_gained, 1);
    }
}
