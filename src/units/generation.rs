//! Random generation of unit names, ids and stat rolls.

use super::types::{Stats, Unit, UnitId};
use crate::core::constants::{
    BASE_STAT_MAX, BASE_STAT_MIN, TRAINING_GROWTH_MAX, TRAINING_GROWTH_MIN,
};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Builder;

pub const NAME_TITLES: [&str; 8] = [
    "Sir", "Lady", "Captain", "Lord", "Dame", "Knight", "Warrior", "Guardian",
];

pub const NAME_CORES: [&str; 10] = [
    "Aether", "Blaze", "Crimson", "Dawn", "Echo", "Frost", "Gale", "Hawk", "Iron", "Jade",
];

pub const NAME_SUFFIXES: [&str; 10] = [
    "blade", "heart", "storm", "shield", "fist", "wing", "fire", "steel", "light", "shadow",
];

/// Composes a display name like "Captain Hawkshield".
pub fn generate_name<R: Rng>(rng: &mut R) -> String {
    let title = NAME_TITLES.choose(rng).copied().unwrap_or("Sir");
    let core = NAME_CORES.choose(rng).copied().unwrap_or("Iron");
    let suffix = NAME_SUFFIXES.choose(rng).copied().unwrap_or("heart");
    format!("{} {}{}", title, core, suffix)
}

/// Random v4 UUID drawn from the session RNG so seeded runs are reproducible.
pub fn generate_unit_id<R: Rng>(rng: &mut R) -> UnitId {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Each base stat is uniform in [10, 29].
pub fn roll_base_stats<R: Rng>(rng: &mut R) -> Stats {
    Stats::new(
        rng.gen_range(BASE_STAT_MIN..=BASE_STAT_MAX),
        rng.gen_range(BASE_STAT_MIN..=BASE_STAT_MAX),
        rng.gen_range(BASE_STAT_MIN..=BASE_STAT_MAX),
    )
}

/// Each stat grows by a uniform amount in [2, 6] on training completion.
pub fn roll_stat_growth<R: Rng>(rng: &mut R) -> Stats {
    Stats::new(
        rng.gen_range(TRAINING_GROWTH_MIN..=TRAINING_GROWTH_MAX),
        rng.gen_range(TRAINING_GROWTH_MIN..=TRAINING_GROWTH_MAX),
        rng.gen_range(TRAINING_GROWTH_MIN..=TRAINING_GROWTH_MAX),
    )
}

pub fn generate_unit<R: Rng>(rng: &mut R) -> Unit {
    let id = generate_unit_id(rng);
    let name = generate_name(rng);
    let stats = roll_base_stats(rng);
    Unit::new(id, name, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_base_stats_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let stats = roll_base_stats(&mut rng);
            for v in [stats.attack, stats.defense, stats.speed] {
                assert!((10..=29).contains(&v), "base stat {} out of range", v);
            }
        }
    }

    #[test]
    fn test_growth_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..1000 {
            let growth = roll_stat_growth(&mut rng);
            for v in [growth.attack, growth.defense, growth.speed] {
                assert!((2..=6).contains(&v));
            }
        }
    }

    #[test]
    fn test_name_has_title_core_and_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let name = generate_name(&mut rng);
            let (title, rest) = name.split_once(' ').expect("title separated by space");
            assert!(NAME_TITLES.contains(&title));
            assert!(NAME_CORES.iter().any(|c| rest.starts_with(c)));
            assert!(NAME_SUFFIXES.iter().any(|s| rest.ends_with(s)));
        }
    }

    #[test]
    fn test_ids_unique_and_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let ids: Vec<UnitId> = (0..500).map(|_| generate_unit_id(&mut a)).collect();
        let again: Vec<UnitId> = (0..500).map(|_| generate_unit_id(&mut b)).collect();
        assert_eq!(ids, again);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
