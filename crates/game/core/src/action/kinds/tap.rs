//! The primary tap interaction.
//!
//! A tap touches almost every counter in the aggregate: coins (scaled by
//! the active coin buff), energy, level progress, daily tasks, lifetime
//! achievements, and the weekly ranking tally. Leveling is resolved inline
//! so a single dispatch observes the evolved state.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::effect::{SyncEffect, UserPatch};
use crate::env::GameEnv;
use crate::state::GameState;

/// One tap on the character, worth `points` base coins.
///
/// Taps are never gated on energy here; an empty pool still registers
/// progress and coins (gating is a presentation concern).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapAction {
    pub points: u32,
}

impl TapAction {
    pub fn new(points: u32) -> Self {
        Self { points }
    }

    /// Coins earned by this tap under `multiplier`, rounded to the nearest
    /// whole coin.
    fn coins_earned(&self, multiplier: f64) -> u64 {
        (f64::from(self.points) * multiplier).round() as u64
    }
}

impl ActionTransition for TapAction {
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.coins = state
            .coins
            .saturating_add(self.coins_earned(state.buffs.coin_multiplier));
        state.energy.current = state.energy.current.saturating_sub(1);

        state.achievements.total_taps = state.achievements.total_taps.saturating_add(1);
        state.ranking.weekly_taps = state.ranking.weekly_taps.saturating_add(1);

        // Daily task bookkeeping; the reward pays out exactly once per day.
        let tasks = &mut state.daily_tasks;
        tasks.tap_progress = tasks.tap_progress.saturating_add(1);
        if !tasks.completed_today && tasks.tap_progress >= tasks.tap_target {
            tasks.completed_today = true;
            state.coins = state.coins.saturating_add(env.config.daily_task_reward);
        }

        if !state.progress.at_max_level {
            state.progress.current = state.progress.current.saturating_add(1);
            if state.progress.current >= state.progress.required {
                state.promote_level();
            }
        }

        if let Some(user_id) = state.sync_target() {
            effects.push(SyncEffect::RecordAction {
                user_id,
                name: "tap",
            });
            effects.push(SyncEffect::UpdateUser {
                user_id,
                patch: UserPatch {
                    coins: Some(state.coins),
                    total_taps: Some(state.achievements.total_taps),
                },
            });
        }

        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        if state.energy.current > state.energy.max {
            return Err(ActionError::EnergyBoundViolated {
                current: state.energy.current,
                max: state.energy.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Millis;

    fn fresh() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let state = GameState::new(&config, Millis::ZERO);
        (state, config)
    }

    #[test]
    fn tap_updates_all_counters() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);
        let mut effects = Vec::new();

        TapAction::new(1)
            .apply(&mut state, &env, &mut effects)
            .unwrap();

        assert_eq!(state.coins, 1);
        assert_eq!(state.energy.current, config.energy_max - 1);
        assert_eq!(state.progress.current, 1);
        assert_eq!(state.achievements.total_taps, 1);
        assert_eq!(state.daily_tasks.tap_progress, 1);
        assert_eq!(state.ranking.weekly_taps, 1);
        assert!(effects.is_empty(), "no sync effects without a bound user");
    }

    #[test]
    fn coin_multiplier_scales_and_rounds() {
        let (mut state, config) = fresh();
        state.buffs.coin_multiplier = 1.5;
        state.buffs.coin_buff_ends = Some(Millis(10_000));
        let env = GameEnv::new(Millis::ZERO, &config);

        TapAction::new(3)
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        // 3 * 1.5 = 4.5, rounds to 5
        assert_eq!(state.coins, 5);
    }

    #[test]
    fn tap_registers_with_empty_energy_pool() {
        let (mut state, config) = fresh();
        state.energy.current = 0;
        let env = GameEnv::new(Millis::ZERO, &config);

        TapAction::new(1)
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.energy.current, 0, "energy saturates at zero");
        assert_eq!(state.coins, 1, "coins still earned");
        assert_eq!(state.progress.current, 1, "progress still registered");
    }

    #[test]
    fn twentieth_tap_evolves_to_terminal_level() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);
        let tap = TapAction::new(1);

        for _ in 0..19 {
            tap.apply(&mut state, &env, &mut Vec::new()).unwrap();
        }
        assert_eq!(state.level.current, 1);
        assert_eq!(state.progress.current, 19);

        tap.apply(&mut state, &env, &mut Vec::new()).unwrap();

        assert_eq!(state.level.current, 2);
        assert!(state.progress.at_max_level, "leveling disabled at terminal");
        assert_eq!(state.progress.current, 0);
    }

    #[test]
    fn no_further_leveling_past_terminal() {
        let (mut state, config) = fresh();
        state.set_level(GameConfig::MAX_LEVEL);
        let env = GameEnv::new(Millis::ZERO, &config);

        for _ in 0..50 {
            TapAction::new(1)
                .apply(&mut state, &env, &mut Vec::new())
                .unwrap();
        }
        assert_eq!(state.level.current, GameConfig::MAX_LEVEL);
    }

    #[test]
    fn daily_target_pays_reward_once() {
        let (mut state, config) = fresh();
        state.daily_tasks.tap_target = 2;
        let env = GameEnv::new(Millis::ZERO, &config);
        let tap = TapAction::new(0);

        tap.apply(&mut state, &env, &mut Vec::new()).unwrap();
        assert!(!state.daily_tasks.completed_today);
        assert_eq!(state.coins, 0);

        tap.apply(&mut state, &env, &mut Vec::new()).unwrap();
        assert!(state.daily_tasks.completed_today);
        assert_eq!(state.coins, config.daily_task_reward);

        tap.apply(&mut state, &env, &mut Vec::new()).unwrap();
        assert_eq!(state.coins, config.daily_task_reward, "reward paid once");
    }

    #[test]
    fn bound_user_emits_record_and_counter_effects() {
        use crate::state::UserId;

        let (mut state, config) = fresh();
        state.user_id = Some(UserId(7));
        let env = GameEnv::new(Millis::ZERO, &config);
        let mut effects = Vec::new();

        TapAction::new(1)
            .apply(&mut state, &env, &mut effects)
            .unwrap();

        assert_eq!(effects.len(), 2);
        assert!(matches!(
            effects[0],
            SyncEffect::RecordAction { name: "tap", .. }
        ));
    }
}
