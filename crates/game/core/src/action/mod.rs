//! Action vocabulary of the game state store.
//!
//! Each operation is a small struct implementing [`ActionTransition`]
//! (pre-validate / apply / post-validate); the [`Action`] enum is the single
//! dispatch surface consumed by the engine. Synthetic scheduler actions and
//! user-driven actions share the same vocabulary and the same pipeline.
//!
//! # Module structure
//!
//! - `error`: validation failures ([`ActionError`])
//! - `kinds`: one file per action family (tap, energy, care, economy, ...)

pub mod error;
pub mod kinds;

pub use error::ActionError;
pub use kinds::care::{
    DegradeStatsAction, FeedPetAction, PlayWithPetAction, ProfilePatch, UpdateProfileAction,
};
pub use kinds::economy::{ApplyBuffAction, Buff, BuyItemAction, ClearExpiredBuffsAction};
pub use kinds::energy::{ClaimRewardAction, RegenEnergyAction, Reward, UpdateEnergyMaxAction};
pub use kinds::level::{EvolveAction, SetLevelAction, UpdateCharacterAction};
pub use kinds::ranking::UpdateRankingAction;
pub use kinds::session::{ResetAction, SetUserIdAction};
pub use kinds::tap::TapAction;
pub use kinds::tasks::ResetDailyTasksAction;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::GameState;

/// Defines how one concrete action mutates game state.
///
/// Implementors may override the validation hooks to surface pre- and
/// post-conditions that must hold around the mutation. `apply` receives the
/// effect accumulator and pushes the remote-sync commands the action
/// implies; all hooks must stay free of I/O.
pub trait ActionTransition {
    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    /// Implementations may assume `pre_validate` already succeeded.
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Top-level action enum: the full vocabulary of the state machine.
///
/// Variant names double as the snake_case action names used in logs and the
/// remote action record stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tap(TapAction),
    RegenEnergy(RegenEnergyAction),
    Evolve(EvolveAction),
    SetLevel(SetLevelAction),
    UpdateProfile(UpdateProfileAction),
    UpdateCharacter(UpdateCharacterAction),
    FeedPet(FeedPetAction),
    PlayWithPet(PlayWithPetAction),
    ClaimReward(ClaimRewardAction),
    BuyItem(BuyItemAction),
    ApplyBuff(ApplyBuffAction),
    ClearExpiredBuffs(ClearExpiredBuffsAction),
    DegradeStats(DegradeStatsAction),
    UpdateEnergyMax(UpdateEnergyMaxAction),
    UpdateRanking(UpdateRankingAction),
    ResetDailyTasks(ResetDailyTasksAction),
    SetUserId(SetUserIdAction),
    Reset(ResetAction),
}

impl Action {
    /// Snake_case name used for logging and remote action records.
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}
