use serde::{Deserialize, Serialize};

/// Game rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Energy pool size for a fresh pet.
    pub energy_max: u32,
    /// Energy restored per regeneration tick (before buffs).
    pub energy_regen_rate: u32,
    /// Daily tap target contributed by each character level.
    pub daily_taps_per_level: u32,
    /// Coins paid out when the daily tap target is reached.
    pub daily_task_reward: u64,
    /// Time without feeding after which stats start to degrade.
    pub degrade_after_ms: i64,
}

impl GameConfig {
    // ===== fixed rule constants =====
    /// Terminal character level (orey evolves into the squirrel and stops).
    pub const MAX_LEVEL: u8 = 2;
    /// Taps required to evolve out of level 1.
    ///
    /// This is the single authoritative leveling threshold; the old UI copy
    /// claiming "100 taps" referred to the server rating scale below.
    pub const LEVEL_UP_TAPS: u32 = 20;
    /// Server-side character rating at which the pet counts as evolved.
    pub const EVOLVED_RATING: u32 = 100;
    /// Satiety restored by one feeding.
    pub const FEED_SATIETY_GAIN: u8 = 20;
    /// Mood restored by one play session.
    pub const PLAY_MOOD_GAIN: u8 = 20;
    /// Satiety/mood lost per degradation tick when the pet goes unfed.
    pub const STAT_DECAY: u8 = 5;
    /// Health lost per degradation tick while satiety is critical.
    pub const HEALTH_DECAY: u8 = 5;
    /// Satiety below which health starts to suffer.
    pub const CRITICAL_SATIETY: u8 = 20;
    /// Upper bound shared by satiety, mood, and health.
    pub const STAT_CEILING: u8 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_MAX: u32 = 100;
    pub const DEFAULT_ENERGY_REGEN_RATE: u32 = 1;
    pub const DEFAULT_DAILY_TAPS_PER_LEVEL: u32 = 50;
    pub const DEFAULT_DAILY_TASK_REWARD: u64 = 100;
    /// Six hours without feeding before degradation kicks in.
    pub const DEFAULT_DEGRADE_AFTER_MS: i64 = 6 * 60 * 60 * 1000;

    pub fn new() -> Self {
        Self {
            energy_max: Self::DEFAULT_ENERGY_MAX,
            energy_regen_rate: Self::DEFAULT_ENERGY_REGEN_RATE,
            daily_taps_per_level: Self::DEFAULT_DAILY_TAPS_PER_LEVEL,
            daily_task_reward: Self::DEFAULT_DAILY_TASK_REWARD,
            degrade_after_ms: Self::DEFAULT_DEGRADE_AFTER_MS,
        }
    }

    /// Daily tap target for a character at `level`.
    pub fn daily_tap_target(&self, level: u8) -> u32 {
        self.daily_taps_per_level * u32::from(level)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
