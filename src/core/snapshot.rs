//! Read-only render view of a session plus the values a front end derives
//! from it (costs, button states, previews).

use super::clock::Timestamp;
use super::constants::{ENEMY_POWER_PER_LEVEL, RECRUIT_COST};
use super::economy::{Settings, UpgradeKind, Upgrades};
use super::game_state::GameState;
use crate::battle::{victory_reward, Encounter};
use crate::training::TrainingSlot;
use crate::units::{Unit, UnitId};

/// Anything that can display a session.
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot);
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOffer {
    pub kind: UpgradeKind,
    pub cost: u64,
    pub affordable: bool,
    pub maxed: bool,
}

impl UpgradeOffer {
    pub fn can_buy(&self) -> bool {
        self.affordable && !self.maxed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub unit_id: Option<UnitId>,
    pub unit_name: Option<String>,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncounterView {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub enemy_level: u32,
    pub progress: f64,
    pub remaining_ms: i64,
}

/// "Start Training" button: enabled with something selected and a free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingButton {
    pub enabled: bool,
    pub selected: usize,
}

impl TrainingButton {
    pub fn label(&self) -> String {
        if self.enabled {
            format!("Start Training ({} heroes)", self.selected)
        } else {
            "Start Training".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub now: Timestamp,
    pub coins: u64,
    pub gems: u64,
    pub level: u32,
    pub exp: u64,
    pub required_exp: u64,
    pub enemy_level: u32,
    pub enemy_power: u64,
    pub upgrades: Upgrades,
    pub settings: Settings,
    pub units: Vec<Unit>,
    pub selection: Vec<UnitId>,
    pub slots: Vec<SlotView>,
    pub offers: Vec<UpgradeOffer>,
    pub can_recruit: bool,
    pub training_button: TrainingButton,
    pub can_battle: bool,
    pub reward_preview: u64,
    pub encounter: Option<EncounterView>,
    pub log: Vec<String>,
}

impl Snapshot {
    pub fn build(
        state: &GameState,
        selection: &[UnitId],
        encounter: Option<&Encounter>,
        log: Vec<String>,
        now: Timestamp,
    ) -> Self {
        let economy = &state.economy;
        let capacity = state.upgrades.training_slots as usize;

        let slots = state
            .training_slots
            .iter()
            .take(capacity)
            .enumerate()
            .map(|(index, slot)| {
                let unit = slot.unit_id().and_then(|id| state.unit(id));
                SlotView {
                    index,
                    unit_id: slot.unit_id(),
                    unit_name: unit.map(|u| u.name.clone()),
                    progress: match slot {
                        TrainingSlot::Occupied { .. } => unit.map_or(0.0, |u| u.training_progress),
                        TrainingSlot::Empty => 0.0,
                    },
                }
            })
            .collect();

        let offers = UpgradeKind::ALL
            .iter()
            .map(|&kind| {
                let cost = kind.cost(&state.upgrades);
                UpgradeOffer {
                    kind,
                    cost,
                    affordable: economy.can_afford(cost),
                    maxed: kind.is_maxed(&state.upgrades),
                }
            })
            .collect();

        let encounter = encounter.map(|e| EncounterView {
            unit_id: e.unit_id,
            unit_name: state
                .unit(e.unit_id)
                .map_or_else(String::new, |u| u.name.clone()),
            enemy_level: e.enemy_level,
            progress: e.progress(now),
            remaining_ms: (e.ends_at() - now).max(0),
        });

        Self {
            now,
            coins: economy.coins,
            gems: economy.gems,
            level: economy.level,
            exp: economy.exp,
            required_exp: economy.required_exp(),
            enemy_level: economy.enemy_level,
            enemy_power: economy.enemy_level as u64 * ENEMY_POWER_PER_LEVEL,
            upgrades: state.upgrades.clone(),
            settings: state.settings,
            units: state.units.clone(),
            selection: selection.to_vec(),
            slots,
            offers,
            can_recruit: economy.can_afford(RECRUIT_COST),
            training_button: TrainingButton {
                enabled: !selection.is_empty() && state.available_slots() > 0,
                selected: selection.len(),
            },
            can_battle: encounter.is_none() && state.has_idle_unit(),
            reward_preview: victory_reward(economy.enemy_level, state.upgrades.battle_rewards),
            encounter,
            log,
        }
    }

    pub fn is_selected(&self, id: UnitId) -> bool {
        self.selection.contains(&id)
    }

    pub fn offer(&self, kind: UpgradeKind) -> Option<&UpgradeOffer> {
        self.offers.iter().find(|o| o.kind == kind)
    }
}
