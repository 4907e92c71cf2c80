//! Training slot data structures.

use crate::core::clock::Timestamp;
use crate::units::UnitId;

/// One training slot. Holds a unit id (not the unit) plus the time training
/// started; the unit registry owns the unit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingSlot {
    #[default]
    Empty,
    Occupied {
        unit_id: UnitId,
        started_at: Timestamp,
    },
}

impl TrainingSlot {
    pub fn is_occupied(&self) -> bool {
        matches!(self, TrainingSlot::Occupied { .. })
    }

    pub fn unit_id(&self) -> Option<UnitId> {
        match self {
            TrainingSlot::Occupied { unit_id, .. } => Some(*unit_id),
            TrainingSlot::Empty => None,
        }
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        match self {
            TrainingSlot::Occupied { started_at, .. } => Some(*started_at),
            TrainingSlot::Empty => None,
        }
    }
}

/// A unit placed into a slot by `start_training`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingAssignment {
    pub slot: usize,
    pub unit_id: UnitId,
}

/// Payout from a finished training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingCompletion {
    pub slot: usize,
    pub unit_id: UnitId,
    pub new_level: u32,
    pub coins_awarded: u64,
    /// Player levels gained from the training exp
    pub player_levels_gained: u32,
}
