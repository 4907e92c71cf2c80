//! Integration test: save, reload and resume
//!
//! Round-trips sessions through the file store and checks that training
//! resumes from the saved start times.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tycoon::core::clock::{Clock, ManualClock};
use tycoon::core::{GameState, Session};
use tycoon::persistence::{decode, load_or_default, FileStore, MemoryStore, SaveStore};
use tycoon::units::{Stats, Unit, UnitStatus};
use tycoon::SessionConfig;
use uuid::Uuid;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(11)
}

fn state_with_units(count: u128) -> GameState {
    let mut state = GameState::new();
    for n in 1..=count {
        state.units.push(Unit::new(
            Uuid::from_u128(n),
            format!("Hero {}", n),
            Stats::new(15, 15, 15),
        ));
    }
    state
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_progress_monotonic_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tycoon.sav");
    let clock = ManualClock::new(100_000);

    let mut session = Session::new(
        state_with_units(2),
        SessionConfig::default(),
        Box::new(FileStore::new(&path)),
        rng(),
        clock.now(),
    );
    session.toggle_select(Uuid::from_u128(2)).unwrap();
    session.start_training().unwrap();
    session.advance_to(clock.advance(4_000));
    let before = session.state().units[1].training_progress;
    assert_eq!(before, 0.4);
    session.persist();
    drop(session);

    clock.advance(3_000);
    let (mut resumed, report) =
        Session::resume(SessionConfig::default(), Box::new(FileStore::new(&path)), rng(), clock.now());
    assert_eq!(report.elapsed_ms, 3_000);
    assert_eq!(report.trainings_completed, 0);

    let unit = resumed.state().unit(Uuid::from_u128(2)).unwrap();
    assert_eq!(unit.status, UnitStatus::Training);
    assert_eq!(resumed.state().training_slots[0].started_at(), Some(100_000));

    resumed.advance_to(clock.advance(100));
    let after = resumed.state().units[1].training_progress;
    assert!(after >= before);
    assert_eq!(after, 0.71);
}

#[test]
fn test_training_finished_while_away_pays_on_resume() {
    let store = MemoryStore::default();
    let clock = ManualClock::new(0);

    let mut session = Session::new(
        state_with_units(3),
        SessionConfig::default(),
        Box::new(store.clone()),
        rng(),
        clock.now(),
    );
    for n in 1..=3 {
        session.toggle_select(Uuid::from_u128(n)).unwrap();
    }
    session.start_training().unwrap();
    drop(session);

    // two hours later
    clock.advance(7_200_000);
    let (resumed, report) =
        Session::resume(SessionConfig::default(), Box::new(store), rng(), clock.now());
    assert_eq!(report.trainings_completed, 3);
    assert_eq!(report.coins_gained, 3 * 50);
    assert_eq!(report.summary(), "Away 2h 0m: 3 trainings finished, +150 coins");
    assert_eq!(resumed.state().count_with_status(UnitStatus::Idle), 3);
    assert_eq!(resumed.state().occupied_slots(), 0);
}

#[test]
fn test_auto_trainer_resumes_after_load() {
    let store = MemoryStore::default();
    let clock = ManualClock::new(0);
    let mut session = Session::new(
        state_with_units(1),
        SessionConfig::default(),
        Box::new(store.clone()),
        rng(),
        clock.now(),
    );
    session.toggle_auto_trainer().unwrap();
    drop(session);

    let (mut resumed, _) =
        Session::resume(SessionConfig::default(), Box::new(store), rng(), clock.advance(60_000));
    assert!(resumed.is_auto_trainer_armed());
    resumed.advance_to(clock.advance(5_000));
    assert_eq!(resumed.state().units[0].status, UnitStatus::Training);
}

#[test]
fn test_battling_unit_loads_idle() {
    let store = MemoryStore::default();
    let clock = ManualClock::new(0);
    let mut session = Session::new(
        state_with_units(1),
        SessionConfig::default(),
        Box::new(store.clone()),
        rng(),
        clock.now(),
    );
    session.start_battle().unwrap();

    let saved = decode(&store.blob().unwrap()).unwrap();
    assert_eq!(saved.units[0].status, UnitStatus::Battling);

    let loaded = load_or_default(&store);
    assert_eq!(loaded.state.units[0].status, UnitStatus::Idle);
    assert_eq!(loaded.saved_at, Some(0));
}

// =============================================================================
// Failure Fallbacks
// =============================================================================

#[test]
fn test_corrupt_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tycoon.sav");
    std::fs::write(&path, b"definitely not a save").unwrap();

    let (session, report) =
        Session::resume(SessionConfig::default(), Box::new(FileStore::new(&path)), rng(), 0);
    assert_eq!(session.state(), &GameState::new());
    assert_eq!(report.elapsed_ms, 0);
}

#[test]
fn test_tampered_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tycoon.sav");
    let mut store = FileStore::new(&path);
    let mut state = GameState::new();
    state.economy.coins = 123_456;
    store
        .save(&tycoon::persistence::encode(&state, 0).unwrap())
        .unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes[20] ^= 0x01;
    std::fs::write(&path, bytes).unwrap();

    assert_eq!(load_or_default(&store).state.economy.coins, 1_000);
}

#[test]
fn test_save_to_unwritable_location_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the file should be
    let path = dir.path().join("occupied");
    std::fs::create_dir_all(path.join("child")).unwrap();

    let mut session = Session::new(
        GameState::new(),
        SessionConfig::default(),
        Box::new(FileStore::new(&path)),
        rng(),
        0,
    );
    session.recruit().unwrap();
    assert_eq!(session.state().units.len(), 1);
    assert_eq!(session.stats().saves_failed, 1);
}
