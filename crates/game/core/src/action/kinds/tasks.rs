//! Daily-task lifecycle.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::{DailyTasks, GameState};

/// Full replacement of the daily-task block, dispatched by the daily-reset
/// scheduler when the calendar date rolls over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetDailyTasksAction {
    pub tasks: DailyTasks,
}

impl ActionTransition for ResetDailyTasksAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.daily_tasks = self.tasks;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Millis;

    #[test]
    fn reset_replaces_the_whole_block() {
        let config = GameConfig::default();
        let yesterday = Millis::ZERO;
        let today = Millis(24 * 60 * 60 * 1000);

        let mut state = GameState::new(&config, yesterday);
        state.daily_tasks.tap_progress = 33;
        state.daily_tasks.completed_today = true;

        let env = GameEnv::new(today, &config);
        ResetDailyTasksAction {
            tasks: DailyTasks::fresh(config.daily_tap_target(state.level.current), today),
        }
        .apply(&mut state, &env, &mut Vec::new())
        .unwrap();

        assert_eq!(state.daily_tasks.tap_progress, 0);
        assert!(!state.daily_tasks.completed_today);
        assert_eq!(state.daily_tasks.last_reset, today);
    }
}
