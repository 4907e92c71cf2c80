//! Headless balance simulator.
//!
//! Runs seeded sessions on a virtual clock and aggregates what they earned:
//! - Coins, player level and opponent level after N hours
//! - Roster size and training throughput
//! - Battle win/loss counts
//!
//! Every run drives a real [`Session`](crate::core::Session), so results
//! match actual gameplay.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, Strategy};
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
