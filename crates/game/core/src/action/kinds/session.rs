//! Session lifecycle: identity binding and full reset.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::{GameState, UserId};

/// Binds the authenticated identity; remote-sync effects fire from here on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetUserIdAction {
    pub user_id: UserId,
}

impl ActionTransition for SetUserIdAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.user_id = Some(self.user_id);
        Ok(())
    }
}

/// Replaces the state with the initial value. The identity binding does not
/// survive a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAction;

impl ActionTransition for ResetAction {
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        *state = GameState::new(env.config, env.now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Millis;

    #[test]
    fn reset_restores_the_initial_value() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Millis::ZERO);
        state.coins = 500;
        state.user_id = Some(UserId(1));

        let env = GameEnv::new(Millis(99), &config);
        ResetAction.apply(&mut state, &env, &mut Vec::new()).unwrap();

        assert_eq!(state, GameState::new(&config, Millis(99)));
        assert_eq!(state.user_id, None);
    }
}
