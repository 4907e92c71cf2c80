//! Game balance simulator CLI.
//!
//! Run seeded sessions on a virtual clock to analyze game balance.
//!
//! Examples:
//!   cargo run --bin simulate                          # 100 idle runs, 8 hours each
//!   cargo run --bin simulate -- -n 20 --hours 24      # 20 runs of a full day
//!   cargo run --bin simulate -- --strategy greedy -s 42 --json

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tycoon::simulator::{run_simulation, SimConfig, Strategy};
use tycoon::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Hero Training Tycoon balance simulator")]
struct Args {
    /// Number of simulation runs
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Virtual hours per run
    #[arg(long, default_value_t = 8.0)]
    hours: f64,

    /// Player behavior: idle or greedy
    #[arg(long, default_value = "idle")]
    strategy: Strategy,

    /// Session timer overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,

    /// Print one line per run
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let session = match args.config.as_deref() {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        hours: args.hours,
        strategy: args.strategy,
        session,
        verbosity: if args.verbose { 2 } else { 1 },
        ..Default::default()
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              TYCOON BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Hours per run:  {:.1}", config.hours);
    println!("  Strategy:       {}", config.strategy);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}
