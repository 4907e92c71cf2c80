//! Summary of progress made while the game was closed.
//!
//! Training progress is derived from start times, so nothing needs to be
//! simulated here: the first advance after loading completes whatever
//! finished while away. This report just describes the result.

use super::clock::Timestamp;

/// Report of what happened between the last save and resuming
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    pub elapsed_ms: i64,
    pub trainings_completed: u32,
    pub coins_gained: u64,
    pub player_levels_gained: u32,
}

impl OfflineReport {
    pub fn new(saved_at: Option<Timestamp>, now: Timestamp) -> Self {
        Self {
            elapsed_ms: saved_at.map_or(0, |t| (now - t).max(0)),
            ..Default::default()
        }
    }

    pub fn has_progress(&self) -> bool {
        self.trainings_completed > 0
    }

    /// "Away 2h 5m: 3 trainings finished, +450 coins"
    pub fn summary(&self) -> String {
        let mut text = format!("Away {}", format_duration(self.elapsed_ms));
        if self.has_progress() {
            text.push_str(&format!(
                ": {} training{} finished, +{} coins",
                self.trainings_completed,
                if self.trainings_completed == 1 { "" } else { "s" },
                self.coins_gained
            ));
        }
        text
    }
}

/// Coarse human duration: "45s", "12m 3s", "2h 5m".
pub fn format_duration(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m", h, m)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_from_save_time() {
        assert_eq!(OfflineReport::new(Some(1_000), 61_000).elapsed_ms, 60_000);
        assert_eq!(OfflineReport::new(None, 61_000).elapsed_ms, 0);
        // clock moved backwards
        assert_eq!(OfflineReport::new(Some(5_000), 1_000).elapsed_ms, 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45_000), "45s");
        assert_eq!(format_duration(723_000), "12m 3s");
        assert_eq!(format_duration(7_500_000), "2h 5m");
    }

    #[test]
    fn test_summary() {
        let report = OfflineReport {
            elapsed_ms: 7_500_000,
            trainings_completed: 3,
            coins_gained: 450,
            player_levels_gained: 0,
        };
        assert_eq!(report.summary(), "Away 2h 5m: 3 trainings finished, +450 coins");
        assert_eq!(OfflineReport::new(Some(0), 45_000).summary(), "Away 45s");
    }
}
