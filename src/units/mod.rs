//! Unit registry: recruited heroes, their stats and lifecycle status.

pub mod generation;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
