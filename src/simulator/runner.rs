//! Simulation runner driving real sessions on a virtual clock.

use super::config::{SimConfig, Strategy};
use super::report::{RunStats, SimReport};
use crate::core::clock::{Clock, ManualClock};
use crate::core::constants::RECRUIT_COST;
use crate::core::economy::UpgradeKind;
use crate::core::{GameState, Session};
use crate::persistence::MemoryStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} coins, Lv.{}, enemy Lv.{}, {} units, {}W/{}L",
                run_idx + 1,
                config.num_runs,
                run.final_coins,
                run.final_level,
                run.final_enemy_level,
                run.units,
                run.battles_won,
                run.battles_lost
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(config, all_runs)
}

/// Plays one session for `config.hours` of virtual time.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: R) -> RunStats {
    let clock = ManualClock::new(0);
    let mut session = Session::new(
        GameState::new(),
        config.session.clone(),
        Box::new(MemoryStore::default()),
        rng,
        clock.now(),
    );

    for _ in 0..config.opening_recruits {
        if session.recruit().is_err() {
            break;
        }
    }
    session.toggle_auto_trainer().ok();
    session.toggle_auto_battle().ok();

    let end = config.duration_ms();
    let step = config.step_ms.max(1);
    while clock.now() < end {
        let now = clock.advance(step.min(end - clock.now()));
        session.advance_to(now);
        play_step(&mut session, config.strategy);
    }

    RunStats::from_session(&session)
}

fn play_step<R: Rng>(session: &mut Session<R>, strategy: Strategy) {
    if strategy == Strategy::Greedy {
        spend_coins(session);
    }
    // Auto-battle stops after a defeat; the player restarts it by hand.
    if session.encounter().is_none() && !session.is_auto_battle_pending() {
        session.start_battle().ok();
    }
}

/// Recruits until the roster outnumbers the slots by one, then buys the
/// cheapest upgrade, for as long as anything is affordable.
fn spend_coins<R: Rng>(session: &mut Session<R>) {
    loop {
        let state = session.state();
        let wants_recruit = state.units.len() <= state.upgrades.training_slots as usize
            && state.economy.can_afford(RECRUIT_COST);
        let cheapest = UpgradeKind::ALL
            .iter()
            .copied()
            .filter(|kind| !kind.is_maxed(&state.upgrades))
            .min_by_key(|kind| kind.cost(&state.upgrades))
            .filter(|kind| state.economy.can_afford(kind.cost(&state.upgrades)));

        let bought = if wants_recruit {
            session.recruit().is_ok()
        } else if let Some(kind) = cheapest {
            session.buy_upgrade(kind).is_ok()
        } else {
            false
        };
        if !bought {
            break;
        }
    }
}
