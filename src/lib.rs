//! Hero Training Tycoon - idle training and battle simulation.
//!
//! This module exposes the simulation core for testing and external use.

pub mod battle;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod simulator;
pub mod training;
pub mod units;

pub use crate::config::SessionConfig;
pub use crate::core::{GameState, Session, Snapshot, TickEvent};
pub use crate::error::{ActionError, ActionResult, PersistenceError};
