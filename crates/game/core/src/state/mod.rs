//! Authoritative game state representation.
//!
//! This module owns the single aggregate the reducer operates on. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! engine.
mod types;

pub use types::{
    Achievements, DailyTasks, EnergyMeter, LevelState, Millis, PetProfile, Progress, Ranking,
    TempBuffs, UserId,
};

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Canonical snapshot of the pet-game state.
///
/// Created once at startup (from a cached snapshot or [`GameState::new`]),
/// then replaced wholesale by each applied action. Nothing outside the
/// engine mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Incremented once per applied action; used for snapshot bookkeeping
    /// and log correlation, never by game rules.
    pub revision: u64,

    pub energy: EnergyMeter,
    pub level: LevelState,
    pub progress: Progress,
    pub coins: u64,
    pub profile: PetProfile,
    pub daily_tasks: DailyTasks,
    pub achievements: Achievements,
    pub ranking: Ranking,
    pub buffs: TempBuffs,

    /// Bound after authentication; gates remote-sync effects.
    pub user_id: Option<UserId>,
}

impl GameState {
    /// Creates the initial state for a fresh pet.
    pub fn new(config: &GameConfig, now: Millis) -> Self {
        Self {
            revision: 0,
            energy: EnergyMeter::new(config.energy_max, config.energy_regen_rate),
            level: LevelState::default(),
            progress: Progress::new(GameConfig::LEVEL_UP_TAPS),
            coins: 0,
            profile: PetProfile::fresh(now),
            daily_tasks: DailyTasks::fresh(config.daily_tap_target(1), now),
            achievements: Achievements::default(),
            ranking: Ranking::default(),
            buffs: TempBuffs::default(),
            user_id: None,
        }
    }

    /// The identity remote-sync effects are keyed off, when bound.
    pub fn sync_target(&self) -> Option<UserId> {
        self.user_id
    }

    /// Promotes the character one level, capped at the terminal level.
    ///
    /// Resets tap progress and recomputes the derived `progress` fields so
    /// they stay consistent with `level.current`.
    pub fn promote_level(&mut self) {
        self.set_level(self.level.current.saturating_add(1));
    }

    /// Sets the level directly (clamped to 1..=MAX_LEVEL) and resets progress.
    pub fn set_level(&mut self, level: u8) {
        self.level.current = level.clamp(1, GameConfig::MAX_LEVEL);
        self.progress.current = 0;
        self.progress.required = GameConfig::LEVEL_UP_TAPS;
        self.progress.at_max_level = self.level.current >= GameConfig::MAX_LEVEL;
    }

    /// Debug-only structural invariants checked after every transition.
    pub fn debug_validate(&self) {
        debug_assert!(
            self.energy.current <= self.energy.max,
            "energy.current must not exceed energy.max"
        );
        debug_assert!(
            self.level.current >= 1 && self.level.current <= GameConfig::MAX_LEVEL,
            "level out of range"
        );
        debug_assert_eq!(
            self.progress.at_max_level,
            self.level.current >= GameConfig::MAX_LEVEL,
            "at_max_level must track level.current"
        );
        debug_assert!(
            self.profile.satiety <= GameConfig::STAT_CEILING
                && self.profile.mood <= GameConfig::STAT_CEILING
                && self.profile.health <= GameConfig::STAT_CEILING,
            "profile stats must stay within 0..=100"
        );
        debug_assert!(
            self.buffs.coin_buff_ends.is_some()
                || self.buffs.coin_multiplier == TempBuffs::NEUTRAL_MULTIPLIER,
            "coin multiplier must be neutral without an end timestamp"
        );
        debug_assert!(
            self.buffs.energy_buff_ends.is_some() || self.buffs.energy_regen_bonus == 0,
            "energy bonus must be neutral without an end timestamp"
        );
    }
}
