//! Action execution pipeline.
//!
//! [`PetEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation — user taps and synthetic scheduler actions alike — flows
//! through the same pre_validate → apply → post_validate pipeline, and every
//! successful execution returns the remote-sync effects the action implied.

mod errors;

pub use errors::{ExecuteError, TransitionPhase};

use crate::action::{Action, ActionTransition};
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::GameState;

/// Complete outcome of a successful action execution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionOutcome {
    /// Remote-sync commands to run best-effort after commit. Empty unless a
    /// user is bound and the action implies server work.
    pub effects: Vec<SyncEffect>,
}

/// Engine that applies actions to the state it wraps.
///
/// The engine itself performs no I/O and takes no locks; serialization of
/// dispatches is the caller's job (the runtime funnels everything through a
/// single worker task).
pub struct PetEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> PetEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes one action through the transition pipeline.
    ///
    /// On success the revision counter is bumped and the implied sync
    /// effects are returned. On failure the error reports the phase; note
    /// that an `Apply`-phase failure may leave the wrapped state partially
    /// mutated — callers that need all-or-nothing semantics run the engine
    /// on a working clone and commit only on `Ok` (as the runtime worker
    /// does).
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let mut effects = Vec::new();
        let name = action.name();

        match action {
            Action::Tap(a) => run(a, name, self.state, env, &mut effects)?,
            Action::RegenEnergy(a) => run(a, name, self.state, env, &mut effects)?,
            Action::Evolve(a) => run(a, name, self.state, env, &mut effects)?,
            Action::SetLevel(a) => run(a, name, self.state, env, &mut effects)?,
            Action::UpdateProfile(a) => run(a, name, self.state, env, &mut effects)?,
            Action::UpdateCharacter(a) => run(a, name, self.state, env, &mut effects)?,
            Action::FeedPet(a) => run(a, name, self.state, env, &mut effects)?,
            Action::PlayWithPet(a) => run(a, name, self.state, env, &mut effects)?,
            Action::ClaimReward(a) => run(a, name, self.state, env, &mut effects)?,
            Action::BuyItem(a) => run(a, name, self.state, env, &mut effects)?,
            Action::ApplyBuff(a) => run(a, name, self.state, env, &mut effects)?,
            Action::ClearExpiredBuffs(a) => run(a, name, self.state, env, &mut effects)?,
            Action::DegradeStats(a) => run(a, name, self.state, env, &mut effects)?,
            Action::UpdateEnergyMax(a) => run(a, name, self.state, env, &mut effects)?,
            Action::UpdateRanking(a) => run(a, name, self.state, env, &mut effects)?,
            Action::ResetDailyTasks(a) => run(a, name, self.state, env, &mut effects)?,
            Action::SetUserId(a) => run(a, name, self.state, env, &mut effects)?,
            Action::Reset(a) => run(a, name, self.state, env, &mut effects)?,
        }

        self.state.revision += 1;
        self.state.debug_validate();

        Ok(ExecutionOutcome { effects })
    }
}

/// Runs one transition through the three phases, tagging failures.
fn run<T: ActionTransition>(
    transition: &T,
    name: &str,
    state: &mut GameState,
    env: &GameEnv<'_>,
    effects: &mut Vec<SyncEffect>,
) -> Result<(), ExecuteError> {
    transition
        .pre_validate(state, env)
        .map_err(|e| ExecuteError::new(name, TransitionPhase::PreValidate, e))?;
    transition
        .apply(state, env, effects)
        .map_err(|e| ExecuteError::new(name, TransitionPhase::Apply, e))?;
    transition
        .post_validate(state, env)
        .map_err(|e| ExecuteError::new(name, TransitionPhase::PostValidate, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{BuyItemAction, TapAction};
    use crate::config::GameConfig;
    use crate::state::Millis;

    #[test]
    fn execute_bumps_revision_per_action() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Millis::ZERO);
        let env = GameEnv::new(Millis::ZERO, &config);

        let mut engine = PetEngine::new(&mut state);
        engine
            .execute(&env, &Action::Tap(TapAction::new(1)))
            .unwrap();
        engine
            .execute(&env, &Action::Tap(TapAction::new(1)))
            .unwrap();

        assert_eq!(state.revision, 2);
    }

    #[test]
    fn rejected_action_reports_pre_validate_phase() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Millis::ZERO);
        let env = GameEnv::new(Millis::ZERO, &config);

        let mut engine = PetEngine::new(&mut state);
        let err = engine
            .execute(&env, &Action::BuyItem(BuyItemAction::new(1)))
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.action, "buy_item");
        assert_eq!(state.revision, 0, "rejected action leaves state untouched");
    }

    #[test]
    fn monotonic_tap_counter_across_mixed_actions() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Millis::ZERO);
        state.coins = 10;
        let env = GameEnv::new(Millis::ZERO, &config);

        let actions = [
            Action::Tap(TapAction::new(1)),
            Action::FeedPet(crate::action::FeedPetAction),
            Action::Tap(TapAction::new(1)),
            Action::BuyItem(BuyItemAction::new(5)),
            Action::Tap(TapAction::new(1)),
        ];

        let mut engine = PetEngine::new(&mut state);
        for action in &actions {
            engine.execute(&env, action).unwrap();
        }

        assert_eq!(state.achievements.total_taps, 3);
    }
}
