//! Save blob format.
//!
//! Dedicated serde structs keep the on-disk shape independent of the live
//! `GameState`. Training slots are stored as `{unit_id, start_time}` pairs
//! and re-linked to the unit list on load.

use super::store::SaveStore;
use crate::core::clock::Timestamp;
use crate::core::constants::{MAX_TRAINING_SLOTS, SAVE_VERSION};
use crate::core::economy::{Economy, Settings, Upgrades};
use crate::core::game_state::GameState;
use crate::error::PersistenceError;
use crate::training::TrainingSlot;
use crate::units::{Unit, UnitId, UnitStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A training slot as saved: the unit is referenced by id only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedSlot {
    pub unit_id: Option<UnitId>,
    pub start_time: Option<Timestamp>,
}

impl From<&TrainingSlot> for SavedSlot {
    fn from(slot: &TrainingSlot) -> Self {
        Self {
            unit_id: slot.unit_id(),
            start_time: slot.started_at(),
        }
    }
}

/// Full persisted snapshot. Missing fields fall back to fresh-game values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveBlob {
    pub version: u32,
    pub saved_at: Timestamp,
    pub economy: Economy,
    pub upgrades: Upgrades,
    pub settings: Settings,
    pub units: Vec<Unit>,
    pub training_slots: Vec<SavedSlot>,
}

impl Default for SaveBlob {
    fn default() -> Self {
        Self::capture(&GameState::new(), 0)
    }
}

impl SaveBlob {
    pub fn capture(state: &GameState, saved_at: Timestamp) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at,
            economy: state.economy.clone(),
            upgrades: state.upgrades.clone(),
            settings: state.settings,
            units: state.units.clone(),
            training_slots: state.training_slots.iter().map(SavedSlot::from).collect(),
        }
    }

    /// Rebuilds a consistent `GameState`.
    ///
    /// - a slot whose unit id is missing, repeated, or lacks a start time is empty
    /// - a unit referenced by a slot is `Training`
    /// - any other `Training` or `Battling` unit is `Idle` (encounters are not saved)
    /// - the slot list is padded up to the purchased capacity, at most six
    pub fn restore(self) -> GameState {
        let mut units = self.units;
        let mut seen: HashSet<UnitId> = HashSet::new();

        let mut training_slots: Vec<TrainingSlot> = self
            .training_slots
            .iter()
            .map(|saved| match (saved.unit_id, saved.start_time) {
                (Some(unit_id), Some(started_at))
                    if units.iter().any(|u| u.id == unit_id) && seen.insert(unit_id) =>
                {
                    TrainingSlot::Occupied {
                        unit_id,
                        started_at,
                    }
                }
                _ => TrainingSlot::Empty,
            })
            .collect();

        for unit in &mut units {
            if seen.contains(&unit.id) {
                unit.status = UnitStatus::Training;
                unit.training_progress = unit.training_progress.clamp(0.0, 1.0);
            } else {
                unit.status = UnitStatus::Idle;
                unit.training_progress = 0.0;
            }
        }

        let mut upgrades = self.upgrades;
        upgrades.training_slots = upgrades.training_slots.min(MAX_TRAINING_SLOTS);
        let capacity = upgrades.training_slots as usize;
        if training_slots.len() < capacity {
            training_slots.resize(capacity, TrainingSlot::Empty);
        }

        GameState {
            economy: self.economy,
            upgrades,
            settings: self.settings,
            units,
            training_slots,
        }
    }
}

pub fn encode(state: &GameState, saved_at: Timestamp) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(&SaveBlob::capture(state, saved_at))?)
}

pub fn decode(bytes: &[u8]) -> Result<SaveBlob, PersistenceError> {
    let blob: SaveBlob = serde_json::from_slice(bytes)?;
    if blob.version > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(blob.version));
    }
    Ok(blob)
}

/// A game read back from a store.
#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub state: GameState,
    /// When the blob was written; `None` for a fresh game
    pub saved_at: Option<Timestamp>,
}

/// Loads the saved game, or a fresh one when nothing is stored or the blob
/// can't be read. Failures are logged, never raised.
pub fn load_or_default(store: &dyn SaveStore) -> LoadedGame {
    let fresh = || LoadedGame {
        state: GameState::new(),
        saved_at: None,
    };

    let bytes = match store.load() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return fresh(),
        Err(e) => {
            tracing::warn!("Failed to read save, starting fresh: {}", e);
            return fresh();
        }
    };

    match decode(&bytes) {
        Ok(blob) => {
            let saved_at = blob.saved_at;
            LoadedGame {
                state: blob.restore(),
                saved_at: Some(saved_at),
            }
        }
        Err(e) => {
            tracing::warn!("Failed to parse save, starting fresh: {}", e);
            fresh()
        }
    }
}
