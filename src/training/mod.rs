//! Training subsystem: time-gated slots that level units up.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
