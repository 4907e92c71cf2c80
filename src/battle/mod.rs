//! Battle subsystem: one timed encounter at a time against the opponent.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
