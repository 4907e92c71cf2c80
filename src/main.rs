mod input;
mod ui;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::Command;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tycoon::core::clock::{Clock, SystemClock};
use tycoon::core::constants::{LOG_FILE_NAME, TICK_INTERVAL_MS};
use tycoon::core::{RenderSink, Session};
use tycoon::persistence::FileStore;
use tycoon::SessionConfig;
use ui::{draw_ui, UiState};

#[derive(Parser, Debug)]
#[command(name = "tycoon", version, about = "Hero Training Tycoon - an idle training game")]
struct Args {
    /// Save file location
    #[arg(long)]
    save: Option<PathBuf>,

    /// Session timer overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delete the save and start over
    #[arg(long)]
    reset: bool,
}

/// Logs go to a file next to the save so they don't corrupt the TUI.
fn init_logging(save_path: &Path) {
    let log_path = save_path.with_file_name(LOG_FILE_NAME);
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match SessionConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let store = match args.save {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default_location()?,
    };
    if let Some(parent) = store.path().parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_logging(store.path());

    if args.reset {
        store.delete()?;
        tracing::info!("Save reset at {}", store.path().display());
    }

    let clock = SystemClock;
    let (mut session, report) = Session::resume(
        config,
        Box::new(store),
        ChaCha8Rng::from_entropy(),
        clock.now(),
    );

    let mut ui = UiState::new();
    if report.elapsed_ms > 0 {
        ui.set_status(report.summary());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &mut ui, &clock);
    session.persist();

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Progress saved. Goodbye!");

    result
}

/// Main loop: catch the session up to wall-clock time, redraw, then wait up
/// to one tick for a key.
fn run<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session<R>,
    ui: &mut UiState,
    clock: &dyn Clock,
) -> io::Result<()> {
    loop {
        session.advance_to(clock.now());
        ui.render(&session.snapshot());
        terminal.draw(|frame| draw_ui(frame, ui))?;

        if event::poll(Duration::from_millis(TICK_INTERVAL_MS as u64))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                match input::map_key(key_event.code) {
                    Some(Command::Quit) => return Ok(()),
                    Some(command) => input::apply(session, ui, command),
                    None => {}
                }
            }
        }
    }
}
