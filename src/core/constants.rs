// Tick and timing (milliseconds)
pub const TICK_INTERVAL_MS: i64 = 100;
pub const AUTO_TRAINER_INTERVAL_MS: i64 = 5_000;
pub const AUTO_BATTLE_COOLDOWN_MS: i64 = 2_000;
pub const AUTOSAVE_INTERVAL_MS: i64 = 30_000;

// Starting economy
pub const STARTING_COINS: u64 = 1_000;
pub const STARTING_GEMS: u64 = 50;
pub const STARTING_TRAINING_SLOTS: u32 = 3;
pub const MAX_TRAINING_SLOTS: u32 = 6;

// Player progression: required exp = level * EXP_PER_LEVEL
pub const EXP_PER_LEVEL: u64 = 100;

// Recruitment
pub const RECRUIT_COST: u64 = 500;
pub const BASE_STAT_MIN: u32 = 10;
pub const BASE_STAT_MAX: u32 = 29;

// Training
pub const BASE_TRAINING_DURATION_MS: f64 = 10_000.0;
pub const TRAINING_GROWTH_MIN: u32 = 2;
pub const TRAINING_GROWTH_MAX: u32 = 6;
pub const TRAINING_UNIT_EXPERIENCE: u64 = 50;
pub const TRAINING_COINS_PER_LEVEL: u64 = 25;
pub const TRAINING_PLAYER_EXP: u64 = 25;

// Battle
pub const ENEMY_POWER_PER_LEVEL: u64 = 30;
pub const BATTLE_BASE_DURATION_MS: i64 = 5_000;
pub const BATTLE_MIN_DURATION_MS: i64 = 2_000;
pub const BATTLE_MS_PER_POWER: i64 = 10;
// Victory needs hero power strictly above 4/5 of enemy power
pub const VICTORY_MARGIN_NUMERATOR: u64 = 4;
pub const VICTORY_MARGIN_DENOMINATOR: u64 = 5;
pub const BATTLE_REWARD_PER_ENEMY_LEVEL: f64 = 100.0;
pub const BATTLE_PLAYER_EXP_PER_ENEMY_LEVEL: u64 = 10;
pub const BATTLE_UNIT_EXP_PER_ENEMY_LEVEL: u64 = 20;
pub const ENEMY_LEVEL_UP_CHANCE: f64 = 0.3;

// Upgrades: cost = floor(base * growth^(value - baseline))
pub const TRAINING_SPEED_BASE_COST: f64 = 2_000.0;
pub const TRAINING_SPEED_COST_GROWTH: f64 = 1.5;
pub const TRAINING_SPEED_STEP: f64 = 0.1;
pub const BATTLE_REWARDS_BASE_COST: f64 = 1_500.0;
pub const BATTLE_REWARDS_COST_GROWTH: f64 = 1.4;
pub const BATTLE_REWARDS_STEP: f64 = 0.25;
pub const TRAINING_SLOTS_BASE_COST: f64 = 5_000.0;
pub const TRAINING_SLOTS_COST_GROWTH: f64 = 2.0;

// Save format
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_VERSION_MAGIC: u64 = 0x5459_434F_4F4E_0001;
pub const SAVE_FILE_NAME: &str = "tycoon.sav";
pub const CONFIG_FILE_NAME: &str = "tycoon.toml";
pub const LOG_FILE_NAME: &str = "tycoon.log";

// UI
pub const ACTIVITY_LOG_LEN: usize = 8;
