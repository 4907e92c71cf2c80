//! A play session: the owned game state plus everything that drives it.
//!
//! The session holds the only mutable reference to [`GameState`]. Player
//! actions mutate it synchronously; timers (training tick, battle completion,
//! automation, autosave) are scheduler tasks that run when the caller
//! advances the session clock with [`Session::advance_to`].

use super::automation::auto_train_pass;
use super::clock::Timestamp;
use super::economy::{buy_upgrade, UpgradeKind};
use super::game_state::GameState;
use super::offline::OfflineReport;
use super::scheduler::{Scheduler, TaskHandle};
use super::snapshot::{RenderSink, Snapshot};
use super::tick::{TickEvent, TickResult};
use crate::battle::{self, enemy_power, is_victory, roll_enemy_scaling, Encounter};
use crate::config::SessionConfig;
use crate::error::{ActionError, ActionResult};
use crate::persistence::{encode, load_or_default, SaveStore};
use crate::training::{self, TrainingAssignment, TrainingCompletion};
use crate::units::{self, require_idle, UnitId};
use rand::Rng;
use std::collections::VecDeque;

/// Work the scheduler can hand back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Recompute training progress
    Tick,
    /// One auto-trainer pass
    AutoTrain,
    /// Resolve the in-flight encounter
    CompleteBattle,
    /// Auto-battle re-engage after a victory
    AutoBattle,
    /// Periodic save
    Autosave,
}

/// Running totals for the session, used by the simulator and resume report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub units_recruited: u32,
    pub trainings_completed: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub upgrades_bought: u32,
    pub saves_failed: u32,
}

pub struct Session<R: Rng> {
    state: GameState,
    selection: Vec<UnitId>,
    encounter: Option<Encounter>,
    scheduler: Scheduler<Task>,
    auto_trainer_task: Option<TaskHandle>,
    auto_battle_task: Option<TaskHandle>,
    autosave_due: bool,
    now: Timestamp,
    rng: R,
    store: Box<dyn SaveStore>,
    config: SessionConfig,
    log: VecDeque<String>,
    events: Vec<TickEvent>,
    stats: SessionStats,
}

impl<R: Rng> Session<R> {
    /// Starts a session on `state` at time `now`, arming the training tick,
    /// the autosave and (if enabled in the state) the auto-trainer.
    pub fn new(
        state: GameState,
        config: SessionConfig,
        store: Box<dyn SaveStore>,
        rng: R,
        now: Timestamp,
    ) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_periodic(now, config.tick_interval_ms, Task::Tick);
        scheduler.schedule_periodic(now, config.autosave_interval_ms, Task::Autosave);

        let mut session = Self {
            state,
            selection: Vec::new(),
            encounter: None,
            scheduler,
            auto_trainer_task: None,
            auto_battle_task: None,
            autosave_due: false,
            now,
            rng,
            store,
            config,
            log: VecDeque::new(),
            events: Vec::new(),
            stats: SessionStats::default(),
        };
        if session.state.settings.auto_trainer {
            session.arm_auto_trainer();
        }
        session
    }

    /// Loads the saved game from `store` (or a fresh one) and catches up on
    /// training that finished while the game was closed.
    pub fn resume(
        config: SessionConfig,
        store: Box<dyn SaveStore>,
        rng: R,
        now: Timestamp,
    ) -> (Self, OfflineReport) {
        let loaded = load_or_default(store.as_ref());
        let mut report = OfflineReport::new(loaded.saved_at, now);
        let mut session = Self::new(loaded.state, config, store, rng, now);

        if loaded.saved_at.is_some() {
            let coins_before = session.state.economy.coins;
            let completions = session.advance_training();
            report.trainings_completed = completions.len() as u32;
            report.coins_gained = session.state.economy.coins.saturating_sub(coins_before);
            report.player_levels_gained = completions.iter().map(|c| c.player_levels_gained).sum();
            tracing::info!(
                "Resumed save: away {}ms, {} trainings completed",
                report.elapsed_ms,
                report.trainings_completed
            );
        } else {
            tracing::info!("Started new game");
        }
        (session, report)
    }

    // ── Clock ───────────────────────────────────────────────────

    /// Runs every task due at or before `now`, in due-time order, with the
    /// session clock set to each task's due time while it runs.
    ///
    /// Autosaves missed during a long gap collapse into one write at `now`.
    pub fn advance_to(&mut self, now: Timestamp) -> TickResult {
        let mut tasks_run = 0;
        while let Some((due, task)) = self.scheduler.pop_due(now) {
            self.now = self.now.max(due);
            self.dispatch(task);
            tasks_run += 1;
        }
        self.now = self.now.max(now);
        if std::mem::take(&mut self.autosave_due) {
            self.persist();
        }
        TickResult {
            events: self.take_events(),
            tasks_run,
        }
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::Tick => {
                if !self.advance_training().is_empty() {
                    self.persist();
                }
            }
            Task::AutoTrain => self.run_auto_trainer(),
            Task::CompleteBattle => self.finish_battle(),
            Task::AutoBattle => {
                self.auto_battle_task = None;
                if self.state.settings.auto_battle && self.encounter.is_none() {
                    let result = self.start_battle();
                    if let Err(e) = result {
                        tracing::debug!("Auto-battle skipped: {}", e);
                    }
                }
            }
            Task::Autosave => self.autosave_due = true,
        }
    }

    fn advance_training(&mut self) -> Vec<TrainingCompletion> {
        let completions = training::advance(&mut self.state, self.now, &mut self.rng);
        let gained: u32 = completions.iter().map(|c| c.player_levels_gained).sum();
        let mut reached = self.state.economy.level - gained;
        for completion in &completions {
            self.stats.trainings_completed += 1;
            let name = self.unit_name(completion.unit_id);
            self.emit(TickEvent::TrainingCompleted {
                unit_id: completion.unit_id,
                name,
                new_level: completion.new_level,
                coins: completion.coins_awarded,
            });
            reached += completion.player_levels_gained;
            self.emit_level_ups(reached, completion.player_levels_gained);
        }
        completions
    }

    fn run_auto_trainer(&mut self) {
        let Some(assignments) = auto_train_pass(&mut self.state, self.now) else {
            return;
        };
        tracing::debug!("Auto-trainer assigned {} units", assignments.len());
        self.selection.clear();
        self.emit_assignments(&assignments);
        self.persist();
    }

    fn finish_battle(&mut self) {
        let Some(encounter) = self.encounter.take() else {
            return;
        };
        let victory = self.state.unit(encounter.unit_id).is_some_and(|u| {
            is_victory(u.power(), enemy_power(self.state.economy.enemy_level))
        });
        let enemy_scales = victory && roll_enemy_scaling(&mut self.rng);

        let Some(outcome) = battle::complete_battle(&mut self.state, &encounter, enemy_scales)
        else {
            return;
        };
        let name = self.unit_name(outcome.unit_id);
        if outcome.victory {
            self.stats.battles_won += 1;
            self.emit(TickEvent::BattleWon {
                unit_id: outcome.unit_id,
                name,
                reward: outcome.reward,
                enemy_leveled_up: outcome.enemy_leveled_up,
            });
        } else {
            self.stats.battles_lost += 1;
            self.emit(TickEvent::BattleLost {
                unit_id: outcome.unit_id,
                name,
            });
        }
        self.emit_level_ups(self.state.economy.level, outcome.player_levels_gained);
        self.persist();

        // Defeats never chain.
        if outcome.victory && self.state.settings.auto_battle {
            self.cancel_auto_battle();
            self.auto_battle_task = Some(self.scheduler.schedule_once(
                self.now,
                self.config.auto_battle_cooldown_ms,
                Task::AutoBattle,
            ));
        }
    }

    // ── Actions ─────────────────────────────────────────────────

    /// Spends 500 coins on a new random unit.
    pub fn recruit(&mut self) -> ActionResult<UnitId> {
        let result = units::recruit(&mut self.state, &mut self.rng);
        let unit_id = declined("recruit", result)?;
        self.stats.units_recruited += 1;
        let name = self.unit_name(unit_id);
        self.emit(TickEvent::UnitRecruited { unit_id, name });
        self.persist();
        Ok(unit_id)
    }

    /// Adds an idle unit to the training selection, or removes it if it is
    /// already selected. Returns whether the unit is now selected.
    pub fn toggle_select(&mut self, unit_id: UnitId) -> ActionResult<bool> {
        if let Some(pos) = self.selection.iter().position(|&id| id == unit_id) {
            self.selection.remove(pos);
            self.persist();
            return Ok(false);
        }
        declined("select", require_idle(&self.state, unit_id).map(|_| ()))?;
        if self.selection.len() >= self.state.upgrades.training_slots as usize {
            return declined("select", Err(ActionError::SelectionFull));
        }
        self.selection.push(unit_id);
        self.persist();
        Ok(true)
    }

    /// Moves the selected units into free slots and clears the selection.
    pub fn start_training(&mut self) -> ActionResult<Vec<TrainingAssignment>> {
        if self.selection.is_empty() {
            return declined("start training", Err(ActionError::NothingSelected));
        }
        let result = training::start_training(&mut self.state, &self.selection, self.now);
        let assignments = declined("start training", result)?;
        self.selection.clear();
        self.emit_assignments(&assignments);
        self.persist();
        Ok(assignments)
    }

    /// Sends the strongest idle unit against the current opponent.
    pub fn start_battle(&mut self) -> ActionResult<Encounter> {
        let result = battle::start_battle(&mut self.state, self.encounter.as_ref(), self.now);
        let encounter = declined("start battle", result)?;
        self.scheduler
            .schedule_once(self.now, encounter.duration_ms, Task::CompleteBattle);
        self.encounter = Some(encounter);
        self.prune_selection();

        let name = self.unit_name(encounter.unit_id);
        self.emit(TickEvent::BattleStarted {
            unit_id: encounter.unit_id,
            name,
            enemy_level: encounter.enemy_level,
            duration_ms: encounter.duration_ms,
        });
        self.persist();
        Ok(encounter)
    }

    /// Flips auto-battle. Turning it off cancels a pending re-engage but
    /// leaves a running encounter alone. Returns the new setting.
    pub fn toggle_auto_battle(&mut self) -> ActionResult<bool> {
        let enabled = !self.state.settings.auto_battle;
        self.state.settings.auto_battle = enabled;
        if !enabled {
            self.cancel_auto_battle();
        }
        self.emit(TickEvent::AutoBattleToggled { enabled });
        self.persist();
        Ok(enabled)
    }

    /// Flips the auto-trainer and arms or disarms its periodic pass.
    /// Returns the new setting.
    pub fn toggle_auto_trainer(&mut self) -> ActionResult<bool> {
        let enabled = !self.state.settings.auto_trainer;
        self.state.settings.auto_trainer = enabled;
        if enabled {
            self.arm_auto_trainer();
        } else if let Some(handle) = self.auto_trainer_task.take() {
            self.scheduler.cancel(handle);
        }
        self.emit(TickEvent::AutoTrainerToggled { enabled });
        self.persist();
        Ok(enabled)
    }

    /// Buys one level of `kind`. Returns the price paid.
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> ActionResult<u64> {
        let cost = declined("buy upgrade", buy_upgrade(&mut self.state, kind))?;
        self.stats.upgrades_bought += 1;
        tracing::info!("Bought {} for {} coins", kind.name(), cost);
        self.emit(TickEvent::UpgradePurchased { kind, cost });
        self.persist();
        Ok(cost)
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Writes the current state to the store. Failures are logged only.
    pub fn persist(&mut self) {
        let result = encode(&self.state, self.now).and_then(|blob| self.store.save(&blob));
        if let Err(e) = result {
            self.stats.saves_failed += 1;
            tracing::warn!("Failed to save game: {}", e);
        }
    }

    // ── Views ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::build(
            &self.state,
            &self.selection,
            self.encounter.as_ref(),
            self.log.iter().cloned().collect(),
            self.now,
        )
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.render(&self.snapshot());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn selection(&self) -> &[UnitId] {
        &self.selection
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_auto_trainer_armed(&self) -> bool {
        self.auto_trainer_task
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    pub fn is_auto_battle_pending(&self) -> bool {
        self.auto_battle_task
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    /// Due time of the next scheduled task.
    pub fn next_due(&mut self) -> Option<Timestamp> {
        self.scheduler.next_due()
    }

    /// Events emitted by actions since the last advance or drain.
    pub fn take_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internals ───────────────────────────────────────────────

    fn arm_auto_trainer(&mut self) {
        if let Some(handle) = self.auto_trainer_task.take() {
            self.scheduler.cancel(handle);
        }
        self.auto_trainer_task = Some(self.scheduler.schedule_periodic(
            self.now,
            self.config.auto_trainer_interval_ms,
            Task::AutoTrain,
        ));
    }

    fn cancel_auto_battle(&mut self) {
        if let Some(handle) = self.auto_battle_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Drops selected units that are no longer idle.
    fn prune_selection(&mut self) {
        let state = &self.state;
        self.selection
            .retain(|&id| state.unit(id).is_some_and(|u| u.is_idle()));
    }

    fn emit_assignments(&mut self, assignments: &[TrainingAssignment]) {
        for assignment in assignments {
            let name = self.unit_name(assignment.unit_id);
            self.emit(TickEvent::TrainingStarted {
                unit_id: assignment.unit_id,
                name,
                slot: assignment.slot,
            });
        }
    }

    /// One `LeveledUp` per level in `(reached - gained, reached]`.
    fn emit_level_ups(&mut self, reached: u32, gained: u32) {
        for new_level in (reached + 1 - gained)..=reached {
            self.emit(TickEvent::LeveledUp { new_level });
        }
    }

    fn emit(&mut self, event: TickEvent) {
        self.log.push_front(event.message());
        self.log.truncate(self.config.activity_log_len);
        self.events.push(event);
    }

    fn unit_name(&self, unit_id: UnitId) -> String {
        self.state
            .unit(unit_id)
            .map_or_else(|| "Unknown".to_string(), |u| u.name.clone())
    }
}

/// Logs a declined action at debug level and passes the result through.
fn declined<T>(action: &str, result: ActionResult<T>) -> ActionResult<T> {
    if let Err(e) = &result {
        tracing::debug!("Declined {}: {}", action, e);
    }
    result
}
