//! Error types for declined actions and persistence failures.

use thiserror::Error;

/// Why a player (or automation) action was declined.
///
/// A declined action never mutates game state. Callers are free to ignore
/// the reason; the terminal front end shows it in the footer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("not enough coins: need {cost}, have {available}")]
    InsufficientFunds { cost: u64, available: u64 },

    #[error("no idle unit available")]
    NoIdleUnit,

    #[error("an encounter is already in progress")]
    EncounterInProgress,

    #[error("no free training slot")]
    NoFreeSlot,

    #[error("no units selected")]
    NothingSelected,

    #[error("unit not found")]
    UnitNotFound,

    #[error("unit is not idle")]
    UnitNotIdle,

    #[error("selection already holds as many units as there are slots")]
    SelectionFull,

    #[error("training slots are at the maximum of {0}")]
    SlotCapReached(u32),
}

/// Failure to read or write a save blob.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },

    #[error("Checksum verification failed")]
    Checksum,

    #[error("Save blob truncated: {0}")]
    Truncated(&'static str),

    #[error("Unsupported save version {0}")]
    UnsupportedVersion(u32),
}

/// Failure to read a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
