//! Save/load of the full game state.

pub mod save;
pub mod store;

pub use save::{decode, encode, load_or_default, LoadedGame, SaveBlob, SavedSlot};
pub use store::{FileStore, MemoryStore, SaveStore};
