//! Leaderboard position updates pulled from the remote rank computation.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::GameState;

/// Overwrites the cached leaderboard position, tracking the best ever seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRankingAction {
    pub position: u32,
}

impl ActionTransition for UpdateRankingAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.ranking.position = Some(self.position);
        state.ranking.best_position = Some(match state.ranking.best_position {
            Some(best) => best.min(self.position),
            None => self.position,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Millis;

    #[test]
    fn best_position_only_improves() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Millis::ZERO);
        let env = GameEnv::new(Millis::ZERO, &config);

        UpdateRankingAction { position: 12 }
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();
        assert_eq!(state.ranking.position, Some(12));
        assert_eq!(state.ranking.best_position, Some(12));

        UpdateRankingAction { position: 40 }
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();
        assert_eq!(state.ranking.position, Some(40));
        assert_eq!(state.ranking.best_position, Some(12), "best is sticky");
    }
}
