//! Key bindings onto the session action surface.

use crate::ui::UiState;
use crossterm::event::KeyCode;
use rand::Rng;
use tycoon::core::{Session, UpgradeKind};
use tycoon::ActionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CursorUp,
    CursorDown,
    ToggleSelect,
    Recruit,
    StartTraining,
    StartBattle,
    ToggleAutoBattle,
    ToggleAutoTrainer,
    BuyUpgrade(UpgradeKind),
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('k') => Command::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Command::CursorDown,
        KeyCode::Char(' ') | KeyCode::Enter => Command::ToggleSelect,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Recruit,
        KeyCode::Char('t') | KeyCode::Char('T') => Command::StartTraining,
        KeyCode::Char('b') | KeyCode::Char('B') => Command::StartBattle,
        KeyCode::Char('a') | KeyCode::Char('A') => Command::ToggleAutoBattle,
        KeyCode::Char('u') | KeyCode::Char('U') => Command::ToggleAutoTrainer,
        KeyCode::Char('1') => Command::BuyUpgrade(UpgradeKind::TrainingSpeed),
        KeyCode::Char('2') => Command::BuyUpgrade(UpgradeKind::BattleRewards),
        KeyCode::Char('3') => Command::BuyUpgrade(UpgradeKind::TrainingSlots),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Runs `command` against the session. A declined action shows its reason
/// in the footer until the next successful one.
pub fn apply<R: Rng>(session: &mut Session<R>, ui: &mut UiState, command: Command) {
    let result: ActionResult<()> = match command {
        Command::CursorUp => {
            ui.move_cursor(-1);
            return;
        }
        Command::CursorDown => {
            ui.move_cursor(1);
            return;
        }
        Command::Quit => return,
        Command::ToggleSelect => match ui.unit_at_cursor() {
            Some(id) => session.toggle_select(id).map(|_| ()),
            None => return,
        },
        Command::Recruit => session.recruit().map(|_| ()),
        Command::StartTraining => session.start_training().map(|_| ()),
        Command::StartBattle => session.start_battle().map(|_| ()),
        Command::ToggleAutoBattle => session.toggle_auto_battle().map(|_| ()),
        Command::ToggleAutoTrainer => session.toggle_auto_trainer().map(|_| ()),
        Command::BuyUpgrade(kind) => session.buy_upgrade(kind).map(|_| ()),
    };
    match result {
        Ok(()) => ui.clear_status(),
        Err(e) => ui.set_status(e.to_string()),
    }
    session.render(ui);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tycoon::core::GameState;
    use tycoon::persistence::MemoryStore;
    use tycoon::SessionConfig;

    fn session() -> Session<ChaCha8Rng> {
        Session::new(
            GameState::new(),
            SessionConfig::default(),
            Box::new(MemoryStore::default()),
            ChaCha8Rng::seed_from_u64(5),
            0,
        )
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Char('r')), Some(Command::Recruit));
        assert_eq!(
            map_key(KeyCode::Char('3')),
            Some(Command::BuyUpgrade(UpgradeKind::TrainingSlots))
        );
        assert_eq!(map_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_recruit_select_train() {
        let mut session = session();
        let mut ui = UiState::new();
        apply(&mut session, &mut ui, Command::Recruit);
        apply(&mut session, &mut ui, Command::Recruit);
        apply(&mut session, &mut ui, Command::CursorDown);
        assert_eq!(ui.cursor(), 1);

        apply(&mut session, &mut ui, Command::ToggleSelect);
        assert_eq!(session.selection(), &[session.state().units[1].id]);

        apply(&mut session, &mut ui, Command::StartTraining);
        assert_eq!(session.state().occupied_slots(), 1);
        assert!(ui.status().is_none());
    }

    #[test]
    fn test_declined_action_sets_status() {
        let mut session = session();
        let mut ui = UiState::new();
        apply(&mut session, &mut ui, Command::StartBattle);
        assert!(ui.status().is_some());
        apply(&mut session, &mut ui, Command::Recruit);
        assert!(ui.status().is_none());
    }
}
