//! Core game state and the session that drives it.

pub mod automation;
pub mod clock;
pub mod constants;
pub mod economy;
pub mod game_state;
pub mod offline;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use economy::{Economy, Settings, UpgradeKind, Upgrades};
pub use game_state::GameState;
pub use offline::OfflineReport;
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{Session, SessionStats, Task};
pub use snapshot::{RenderSink, Snapshot};
pub use tick::{TickEvent, TickResult};
