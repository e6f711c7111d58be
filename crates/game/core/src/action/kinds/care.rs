//! Pet wellbeing: feeding, playing, profile merges, and idle degradation.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::effect::{CharacterPatch, SyncEffect};
use crate::env::GameEnv;
use crate::state::{GameState, Millis};

fn raise(stat: u8, gain: u8) -> u8 {
    stat.saturating_add(gain).min(GameConfig::STAT_CEILING)
}

/// Feeds the pet: satiety up, `last_fed` stamped, feed counter bumped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPetAction;

impl ActionTransition for FeedPetAction {
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.profile.satiety = raise(state.profile.satiety, GameConfig::FEED_SATIETY_GAIN);
        state.profile.last_fed = env.now;
        state.achievements.feed_count = state.achievements.feed_count.saturating_add(1);

        if let Some(user_id) = state.sync_target() {
            effects.push(SyncEffect::RecordAction {
                user_id,
                name: "feed_pet",
            });
            effects.push(SyncEffect::UpdateCharacter {
                user_id,
                patch: CharacterPatch {
                    satiety: Some(state.profile.satiety),
                    ..CharacterPatch::default()
                },
            });
        }
        Ok(())
    }
}

/// Plays with the pet: mood up, petted counter bumped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayWithPetAction;

impl ActionTransition for PlayWithPetAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.profile.mood = raise(state.profile.mood, GameConfig::PLAY_MOOD_GAIN);
        state.achievements.petted_count = state.achievements.petted_count.saturating_add(1);

        if let Some(user_id) = state.sync_target() {
            effects.push(SyncEffect::RecordAction {
                user_id,
                name: "play_with_pet",
            });
            effects.push(SyncEffect::UpdateCharacter {
                user_id,
                patch: CharacterPatch {
                    mood: Some(state.profile.mood),
                    ..CharacterPatch::default()
                },
            });
        }
        Ok(())
    }
}

/// Partial profile update; present fields are merged, clamped to 0..=100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub satiety: Option<u8>,
    pub mood: Option<u8>,
    pub health: Option<u8>,
    pub last_fed: Option<Millis>,
}

/// Shallow-merges a [`ProfilePatch`] into the pet profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileAction {
    pub patch: ProfilePatch,
}

impl ActionTransition for UpdateProfileAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        let profile = &mut state.profile;
        if let Some(satiety) = self.patch.satiety {
            profile.satiety = satiety.min(GameConfig::STAT_CEILING);
        }
        if let Some(mood) = self.patch.mood {
            profile.mood = mood.min(GameConfig::STAT_CEILING);
        }
        if let Some(health) = self.patch.health {
            profile.health = health.min(GameConfig::STAT_CEILING);
        }
        if let Some(last_fed) = self.patch.last_fed {
            profile.last_fed = last_fed;
        }
        Ok(())
    }
}

/// Synthetic degradation tick injected by the idle scheduler.
///
/// A no-op while the pet was fed recently; otherwise satiety and mood decay,
/// and health follows once satiety is critically low. The "idle" record is
/// the only remote trace of an unattended pet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradeStatsAction;

impl ActionTransition for DegradeStatsAction {
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        if env.now.since(state.profile.last_fed) <= env.config.degrade_after_ms {
            return Ok(());
        }

        let profile = &mut state.profile;
        profile.satiety = profile.satiety.saturating_sub(GameConfig::STAT_DECAY);
        profile.mood = profile.mood.saturating_sub(GameConfig::STAT_DECAY);
        if profile.satiety < GameConfig::CRITICAL_SATIETY {
            profile.health = profile.health.saturating_sub(GameConfig::HEALTH_DECAY);
        }

        if let Some(user_id) = state.sync_target() {
            effects.push(SyncEffect::RecordAction {
                user_id,
                name: "idle",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let state = GameState::new(&config, Millis::ZERO);
        (state, config)
    }

    #[test]
    fn feed_clamps_satiety_at_ceiling() {
        let (mut state, config) = fresh();
        state.profile.satiety = 95;
        let env = GameEnv::new(Millis(42), &config);

        FeedPetAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.profile.satiety, 100, "95 + 20 clamps to 100");
        assert_eq!(state.profile.last_fed, Millis(42));
        assert_eq!(state.achievements.feed_count, 1);
    }

    #[test]
    fn play_raises_mood_and_petted_count() {
        let (mut state, config) = fresh();
        state.profile.mood = 50;
        let env = GameEnv::new(Millis::ZERO, &config);

        PlayWithPetAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.profile.mood, 70);
        assert_eq!(state.achievements.petted_count, 1);
    }

    #[test]
    fn profile_patch_merges_only_present_fields() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        UpdateProfileAction {
            patch: ProfilePatch {
                mood: Some(130),
                ..ProfilePatch::default()
            },
        }
        .apply(&mut state, &env, &mut Vec::new())
        .unwrap();

        assert_eq!(state.profile.mood, 100, "merged value clamps to ceiling");
        assert_eq!(state.profile.satiety, 100, "untouched field preserved");
    }

    #[test]
    fn degradation_noop_when_recently_fed() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis(1000), &config);

        let before = state.clone();
        DegradeStatsAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn degradation_decays_stats_and_then_health() {
        let (mut state, config) = fresh();
        state.profile.satiety = 6;
        state.profile.mood = 40;
        let env = GameEnv::new(Millis(config.degrade_after_ms + 1), &config);

        DegradeStatsAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.profile.satiety, 1);
        assert_eq!(state.profile.mood, 35);
        assert_eq!(state.profile.health, 95, "critical satiety costs health");
    }
}
