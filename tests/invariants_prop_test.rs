//! Property-based tests for scheduler ordering and session invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tycoon::core::{GameState, Scheduler, Session, UpgradeKind};
use tycoon::persistence::MemoryStore;
use tycoon::units::UnitStatus;
use tycoon::SessionConfig;

#[derive(Debug, Clone)]
enum Op {
    Recruit,
    Select(usize),
    Train,
    Battle,
    AutoBattle,
    AutoTrainer,
    Upgrade(usize),
    Wait(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Recruit),
        (0usize..8).prop_map(Op::Select),
        Just(Op::Train),
        Just(Op::Battle),
        Just(Op::AutoBattle),
        Just(Op::AutoTrainer),
        (0usize..3).prop_map(Op::Upgrade),
        (0i64..20_000).prop_map(Op::Wait),
    ]
}

/// Slot exclusivity, slot/status agreement and the selection bound.
fn check_invariants(session: &Session<ChaCha8Rng>) -> Result<(), TestCaseError> {
    let state = session.state();
    let mut seen = HashSet::new();
    for slot in &state.training_slots {
        if let Some(id) = slot.unit_id() {
            prop_assert!(seen.insert(id), "unit {} in two slots", id);
            let unit = state.unit(id);
            prop_assert!(unit.is_some_and(|u| u.status == UnitStatus::Training));
        }
    }
    prop_assert_eq!(
        state.count_with_status(UnitStatus::Training),
        state.occupied_slots()
    );
    prop_assert!(state.count_with_status(UnitStatus::Battling) <= 1);
    prop_assert!(session.selection().len() <= state.upgrades.training_slots as usize);
    for id in session.selection() {
        prop_assert!(state.unit(*id).is_some_and(|u| u.is_idle()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Tasks come out in due order, ties in scheduling order.
    #[test]
    fn prop_scheduler_pops_in_due_then_seq_order(
        delays in prop::collection::vec(0i64..1_000, 1..50)
    ) {
        let mut scheduler = Scheduler::new();
        for (i, &delay) in delays.iter().enumerate() {
            scheduler.schedule_once(0, delay, i);
        }

        let mut popped = Vec::new();
        while let Some((due, task)) = scheduler.pop_due(i64::MAX) {
            popped.push((due, task));
        }
        prop_assert_eq!(popped.len(), delays.len());

        let mut expected: Vec<(i64, usize)> =
            delays.iter().enumerate().map(|(i, &d)| (d, i)).collect();
        expected.sort();
        prop_assert_eq!(popped, expected);
    }

    /// Cancelling some handles never drops or reorders the others.
    #[test]
    fn prop_cancel_only_affects_its_handle(
        delays in prop::collection::vec(0i64..1_000, 1..40),
        cancel_mask in prop::collection::vec(any::<bool>(), 40)
    ) {
        let mut scheduler = Scheduler::new();
        let handles: Vec<_> = delays
            .iter()
            .enumerate()
            .map(|(i, &d)| scheduler.schedule_once(0, d, i))
            .collect();
        for (i, handle) in handles.iter().enumerate() {
            if cancel_mask[i] {
                prop_assert!(scheduler.cancel(*handle));
            }
        }

        let mut survivors = Vec::new();
        while let Some((_, task)) = scheduler.pop_due(i64::MAX) {
            survivors.push(task);
        }
        let mut expected: Vec<usize> = (0..delays.len()).filter(|&i| !cancel_mask[i]).collect();
        expected.sort_by_key(|&i| (delays[i], i));
        prop_assert_eq!(survivors, expected);
    }

    /// Random action sequences keep every slot and selection invariant.
    #[test]
    fn prop_session_invariants_hold(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let mut state = GameState::new();
        state.economy.coins = 50_000;
        let mut session = Session::new(
            state,
            SessionConfig::default(),
            Box::new(MemoryStore::default()),
            ChaCha8Rng::seed_from_u64(seed),
            0,
        );
        let mut now = 0;

        for op in ops {
            let coins_before = session.state().economy.coins;
            match op {
                Op::Recruit => { session.recruit().ok(); }
                Op::Select(i) => {
                    if let Some(id) = session.state().units.get(i).map(|u| u.id) {
                        session.toggle_select(id).ok();
                    }
                }
                Op::Train => { session.start_training().ok(); }
                Op::Battle => { session.start_battle().ok(); }
                Op::AutoBattle => { session.toggle_auto_battle().ok(); }
                Op::AutoTrainer => { session.toggle_auto_trainer().ok(); }
                Op::Upgrade(k) => {
                    let kind = UpgradeKind::ALL[k];
                    let upgrades_before = session.state().upgrades.clone();
                    if session.buy_upgrade(kind).is_err() {
                        prop_assert_eq!(&session.state().upgrades, &upgrades_before);
                        prop_assert_eq!(session.state().economy.coins, coins_before);
                    }
                }
                Op::Wait(ms) => {
                    now += ms;
                    session.advance_to(now);
                }
            }
            check_invariants(&session)?;
        }
    }
}
