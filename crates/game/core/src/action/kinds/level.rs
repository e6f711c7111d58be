//! Leveling and reconciliation with server-authoritative character data.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::GameState;

/// Explicit evolution request. No-op once the terminal level is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolveAction;

impl ActionTransition for EvolveAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        if !state.progress.at_max_level {
            state.promote_level();
        }
        Ok(())
    }
}

/// Sets the level directly (clamped to the valid range), resetting progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLevelAction {
    pub level: u8,
}

impl ActionTransition for SetLevelAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.set_level(self.level);
        Ok(())
    }
}

/// Reconciles server-authoritative character fields into local state.
///
/// The server rating decides the level (>= [`GameConfig::EVOLVED_RATING`]
/// means evolved); wellbeing fields are synced and health is re-derived as
/// the satiety/mood average. This action pulls remote truth in, so it emits
/// no sync effects of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCharacterAction {
    pub rating: Option<u32>,
    pub mood: Option<u8>,
    pub satiety: Option<u8>,
}

impl ActionTransition for UpdateCharacterAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        if let Some(rating) = self.rating {
            let level = if rating >= GameConfig::EVOLVED_RATING {
                GameConfig::MAX_LEVEL
            } else {
                1
            };
            if level != state.level.current {
                state.set_level(level);
            }
            if !state.progress.at_max_level {
                state.progress.current = rating.min(state.progress.required);
            }
        }
        if let Some(satiety) = self.satiety {
            state.profile.satiety = satiety.min(GameConfig::STAT_CEILING);
        }
        if let Some(mood) = self.mood {
            state.profile.mood = mood.min(GameConfig::STAT_CEILING);
        }
        if self.satiety.is_some() || self.mood.is_some() {
            let satiety = u16::from(state.profile.satiety);
            let mood = u16::from(state.profile.mood);
            state.profile.health = ((satiety + mood) / 2) as u8;
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
    fn evolve_is_terminal_at_max_level() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        EvolveAction.apply(&mut state, &env, &mut Vec::new()).unwrap();
        assert_eq!(state.level.current, 2);
        assert!(state.progress.at_max_level);

        EvolveAction.apply(&mut state, &env, &mut Vec::new()).unwrap();
        assert_eq!(state.level.current, 2, "evolve is a no-op at terminal");
    }

    #[test]
    fn set_level_clamps_to_valid_range() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        SetLevelAction { level: 9 }
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.level.current, GameConfig::MAX_LEVEL);
    }

    #[test]
    fn character_sync_recomputes_level_and_health() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        UpdateCharacterAction {
            rating: Some(150),
            mood: Some(40),
            satiety: Some(60),
        }
        .apply(&mut state, &env, &mut Vec::new())
        .unwrap();

        assert_eq!(state.level.current, 2, "rating >= 100 means evolved");
        assert_eq!(state.profile.satiety, 60);
        assert_eq!(state.profile.mood, 40);
        assert_eq!(state.profile.health, 50, "health = (satiety + mood) / 2");
    }

    #[test]
    fn low_rating_syncs_progress_without_evolving() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        UpdateCharacterAction {
            rating: Some(7),
            ..UpdateCharacterAction::default()
        }
        .apply(&mut state, &env, &mut Vec::new())
        .unwrap();

        assert_eq!(state.level.current, 1);
        assert_eq!(state.progress.current, 7);
    }
}
