//! Deterministic pet-game rules shared across clients.
//!
//! `pet-core` defines the canonical game state, the action vocabulary, and
//! the engine that applies actions one at a time. All state mutation flows
//! through [`engine::PetEngine`]; the crate performs no I/O and reads the
//! wall clock exclusively through the [`env::GameEnv`] value supplied by the
//! caller, so every transition is replayable.
pub mod action;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod state;

pub use action::{
    Action, ActionError, ActionTransition, ApplyBuffAction, Buff, BuyItemAction,
    ClaimRewardAction, ClearExpiredBuffsAction, DegradeStatsAction, EvolveAction, FeedPetAction,
    PlayWithPetAction, ProfilePatch, RegenEnergyAction, ResetAction, ResetDailyTasksAction,
    Reward, SetLevelAction, SetUserIdAction, TapAction, UpdateCharacterAction,
    UpdateEnergyMaxAction, UpdateProfileAction, UpdateRankingAction,
};
pub use config::GameConfig;
pub use effect::{CharacterPatch, SyncEffect, UserPatch};
pub use engine::{ExecuteError, ExecutionOutcome, PetEngine, TransitionPhase};
pub use env::GameEnv;
pub use state::{
    Achievements, DailyTasks, EnergyMeter, GameState, LevelState, Millis, PetProfile, Progress,
    Ranking, TempBuffs, UserId,
};
