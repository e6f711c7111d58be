use std::fmt;

use serde::{Deserialize, Serialize};

/// Unix-epoch timestamp in milliseconds.
///
/// All durations and deadlines in the state are expressed in this unit so
/// the reducer can compare them without touching the wall clock.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Millis(pub i64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is later).
    pub fn since(self, earlier: Millis) -> i64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<i64> for Millis {
    type Output = Millis;
    fn add(self, rhs: i64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External identity issued by the authentication collaborator.
///
/// Matches the Telegram numeric user id. Its presence on the state gates
/// every remote-sync side effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Consumable, regenerating energy pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyMeter {
    pub current: u32,
    pub max: u32,
    /// Energy restored per regeneration tick, before buffs.
    pub regen_rate: u32,
}

impl EnergyMeter {
    pub fn new(max: u32, regen_rate: u32) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
        }
    }

    /// Adds `amount` clamped to the pool maximum.
    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Discrete character growth stage. Level 2 (the squirrel) is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub current: u8,
}

impl LevelState {
    pub fn new(current: u8) -> Self {
        Self { current }
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self { current: 1 }
    }
}

/// Tap progress toward the next level.
///
/// `at_max_level` replaces the old "effectively infinite required" sentinel:
/// once set, taps keep counting but leveling is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: u32,
    pub required: u32,
    pub at_max_level: bool,
}

impl Progress {
    pub fn new(required: u32) -> Self {
        Self {
            current: 0,
            required,
            at_max_level: false,
        }
    }
}

/// Pet wellbeing, each stat bounded 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
    pub satiety: u8,
    pub mood: u8,
    pub health: u8,
    /// When the pet was last fed; drives degradation.
    pub last_fed: Millis,
}

impl PetProfile {
    pub fn fresh(now: Millis) -> Self {
        Self {
            satiety: 100,
            mood: 100,
            health: 100,
            last_fed: now,
        }
    }
}

/// Daily tap goal; resets when the calendar date rolls over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTasks {
    pub tap_target: u32,
    pub tap_progress: u32,
    pub completed_today: bool,
    pub last_reset: Millis,
}

impl DailyTasks {
    pub fn fresh(tap_target: u32, now: Millis) -> Self {
        Self {
            tap_target,
            tap_progress: 0,
            completed_today: false,
            last_reset: now,
        }
    }
}

/// Lifetime counters, monotone under normal play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub total_taps: u64,
    pub feed_count: u32,
    pub petted_count: u32,
    pub items_bought: u32,
}

/// Leaderboard placement. `position` is periodically overwritten from the
/// server-computed rank; `weekly_taps` is tracked locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub position: Option<u32>,
    pub best_position: Option<u32>,
    pub weekly_taps: u64,
}

/// Time-boxed earning multipliers.
///
/// Invariant: a value is neutral (multiplier 1.0, bonus 0) whenever its end
/// timestamp is unset. Expiry is enforced by the sweep action, not eagerly
/// on read.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TempBuffs {
    pub coin_multiplier: f64,
    pub energy_regen_bonus: u32,
    pub coin_buff_ends: Option<Millis>,
    pub energy_buff_ends: Option<Millis>,
}

impl TempBuffs {
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

    /// True when the coin buff holds a non-neutral value at `now`.
    pub fn coin_buff_active(&self, now: Millis) -> bool {
        self.coin_buff_ends.is_some_and(|ends| now < ends)
    }

    /// True when the energy buff holds a non-neutral value at `now`.
    pub fn energy_buff_active(&self, now: Millis) -> bool {
        self.energy_buff_ends.is_some_and(|ends| now < ends)
    }
}

impl Default for TempBuffs {
    fn default() -> Self {
        Self {
            coin_multiplier: Self::NEUTRAL_MULTIPLIER,
            energy_regen_bonus: 0,
            coin_buff_ends: None,
            energy_buff_ends: None,
        }
    }
}
