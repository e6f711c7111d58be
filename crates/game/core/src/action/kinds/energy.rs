//! Energy pool maintenance and reward claims.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::effect::SyncEffect;
use crate::env::GameEnv;
use crate::state::GameState;

/// Synthetic regeneration tick injected by the energy scheduler.
///
/// Clamped to `energy.max`; the claim path below uses the same clamp so the
/// user-visible energy bound holds regardless of which path restored it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenEnergyAction {
    pub amount: u32,
}

impl RegenEnergyAction {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }
}

impl ActionTransition for RegenEnergyAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.energy.restore(self.amount);
        Ok(())
    }
}

/// Resizes the energy pool (store upgrades). Current energy is re-clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEnergyMaxAction {
    pub max: u32,
}

impl ActionTransition for UpdateEnergyMaxAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.energy.max = self.max;
        state.energy.current = state.energy.current.min(self.max);
        Ok(())
    }
}

/// Reward payloads a claim can carry.
///
/// A closed enum: the legacy "unknown reward type is silently ignored" edge
/// case is unrepresentable here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Coins(u64),
    Energy(u32),
}

/// Claim of a task, achievement, or mini-game reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardAction {
    pub reward: Reward,
}

impl ClaimRewardAction {
    pub fn coins(amount: u64) -> Self {
        Self {
            reward: Reward::Coins(amount),
        }
    }

    pub fn energy(amount: u32) -> Self {
        Self {
            reward: Reward::Energy(amount),
        }
    }
}

impl ActionTransition for ClaimRewardAction {
    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        match self.reward {
            Reward::Coins(amount) => state.coins = state.coins.saturating_add(amount),
            Reward::Energy(amount) => state.energy.restore(amount),
        }
        Ok(())
    }
}
