use super::economy::{Economy, Settings, Upgrades};
use crate::training::TrainingSlot;
use crate::units::{Unit, UnitId, UnitStatus};

/// Main game state: economy, upgrades, settings, the unit registry and the
/// training slots. Owned by a single session; nothing else mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub economy: Economy,
    pub upgrades: Upgrades,
    pub settings: Settings,
    /// Unit registry in recruitment order
    pub units: Vec<Unit>,
    /// Always at least `upgrades.training_slots` long; never shrinks
    pub training_slots: Vec<TrainingSlot>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game: 1000 coins, 50 gems, level 1, three empty slots, no units.
    pub fn new() -> Self {
        let upgrades = Upgrades::default();
        let training_slots = vec![TrainingSlot::Empty; upgrades.training_slots as usize];
        Self {
            economy: Economy::default(),
            upgrades,
            settings: Settings::default(),
            units: Vec::new(),
            training_slots,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn idle_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_idle())
    }

    pub fn has_idle_unit(&self) -> bool {
        self.units.iter().any(|u| u.is_idle())
    }

    pub fn count_with_status(&self, status: UnitStatus) -> usize {
        self.units.iter().filter(|u| u.status == status).count()
    }

    /// Slots currently holding a unit.
    pub fn occupied_slots(&self) -> usize {
        self.training_slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Capacity minus occupied slots, never negative.
    pub fn available_slots(&self) -> usize {
        (self.upgrades.training_slots as usize).saturating_sub(self.occupied_slots())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new();
        assert_eq!(state.economy.coins, 1000);
        assert_eq!(state.economy.gems, 50);
        assert_eq!(state.economy.level, 1);
        assert_eq!(state.economy.enemy_level, 1);
        assert_eq!(state.upgrades.training_slots, 3);
        assert_eq!(state.training_slots.len(), 3);
        assert!(state.units.is_empty());
        assert!(!state.settings.auto_battle);
        assert!(!state.settings.auto_trainer);
        assert_eq!(state.available_slots(), 3);
    }
}
