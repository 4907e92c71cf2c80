//! Time sources. All simulation time is integer milliseconds.

use chrono::Utc;
use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds since the Unix epoch (or since an arbitrary origin for
/// virtual clocks).
pub type Timestamp = i64;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp_millis()
    }
}

/// Virtual clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, delta_ms: i64) -> Timestamp {
        let next = self.now.get() + delta_ms;
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let view = clock.clone();
        clock.advance(250);
        assert_eq!(view.now(), 1_250);
        view.set(5_000);
        assert_eq!(clock.now(), 5_000);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01 in milliseconds
        assert!(SystemClock.now() > 1_577_836_800_000);
    }
}
