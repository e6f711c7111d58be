//! Coin economy: purchases and temporary buffs.

use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionTransition};
use crate::effect::{SyncEffect, UserPatch};
use crate::env::GameEnv;
use crate::state::{GameState, TempBuffs};

/// Store purchase. Rejected during pre-validate when coins are short, which
/// leaves the committed state untouched — the caller observes a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyItemAction {
    pub price: u64,
}

impl BuyItemAction {
    pub fn new(price: u64) -> Self {
        Self { price }
    }
}

impl ActionTransition for BuyItemAction {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        if state.coins < self.price {
            return Err(ActionError::InsufficientCoins {
                coins: state.coins,
                price: self.price,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        state.coins -= self.price;
        state.achievements.items_bought = state.achievements.items_bought.saturating_add(1);

        if let Some(user_id) = state.sync_target() {
            effects.push(SyncEffect::RecordAction {
                user_id,
                name: "buy_item",
            });
            effects.push(SyncEffect::UpdateUser {
                user_id,
                patch: UserPatch {
                    coins: Some(state.coins),
                    ..UserPatch::default()
                },
            });
        }
        Ok(())
    }
}

/// Buff payloads. Closed enum; there is no "unknown buff type" path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Buff {
    /// Multiplies coin earnings from taps while active.
    Coin { multiplier: f64, duration_ms: i64 },
    /// Adds to the per-tick energy regeneration while active.
    Energy { regen_bonus: u32, duration_ms: i64 },
}

impl Buff {
    fn duration_ms(&self) -> i64 {
        match self {
            Buff::Coin { duration_ms, .. } | Buff::Energy { duration_ms, .. } => *duration_ms,
        }
    }
}

/// Activates a time-boxed buff ending at `now + duration`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplyBuffAction {
    pub buff: Buff,
}

impl ActionTransition for ApplyBuffAction {
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let duration_ms = self.buff.duration_ms();
        if duration_ms <= 0 {
            return Err(ActionError::NonPositiveBuffDuration { duration_ms });
        }
        if let Buff::Coin { multiplier, .. } = self.buff
            && multiplier < TempBuffs::NEUTRAL_MULTIPLIER
        {
            return Err(ActionError::InvalidMultiplier);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        match self.buff {
            Buff::Coin {
                multiplier,
                duration_ms,
            } => {
                state.buffs.coin_multiplier = multiplier;
                state.buffs.coin_buff_ends = Some(env.now + duration_ms);
            }
            Buff::Energy {
                regen_bonus,
                duration_ms,
            } => {
                state.buffs.energy_regen_bonus = regen_bonus;
                state.buffs.energy_buff_ends = Some(env.now + duration_ms);
            }
        }
        Ok(())
    }
}

/// Synthetic sweep injected by the buff-expiry scheduler.
///
/// Reverts any buff whose deadline has passed to its neutral value and
/// unsets the deadline. Pure no-op while everything is still active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearExpiredBuffsAction;

impl ActionTransition for ClearExpiredBuffsAction {
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        _effects: &mut Vec<SyncEffect>,
    ) -> Result<(), ActionError> {
        let buffs = &mut state.buffs;
        if buffs.coin_buff_ends.is_some_and(|ends| ends <= env.now) {
            buffs.coin_multiplier = TempBuffs::NEUTRAL_MULTIPLIER;
            buffs.coin_buff_ends = None;
        }
        if buffs.energy_buff_ends.is_some_and(|ends| ends <= env.now) {
            buffs.energy_regen_bonus = 0;
            buffs.energy_buff_ends = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Millis;

    fn fresh() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let state = GameState::new(&config, Millis::ZERO);
        (state, config)
    }

    #[test]
    fn buy_item_spends_exactly_the_price() {
        let (mut state, config) = fresh();
        state.coins = 100;
        let env = GameEnv::new(Millis::ZERO, &config);
        let action = BuyItemAction::new(100);

        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env, &mut Vec::new()).unwrap();

        assert_eq!(state.coins, 0);
        assert_eq!(state.achievements.items_bought, 1);
    }

    #[test]
    fn overdraw_is_rejected_before_mutation() {
        let (state, config) = fresh();
        let env = GameEnv::new(Millis::ZERO, &config);

        let err = BuyItemAction::new(state.coins + 1)
            .pre_validate(&state, &env)
            .unwrap_err();

        assert!(matches!(err, ActionError::InsufficientCoins { .. }));
    }

    #[test]
    fn coin_buff_sets_multiplier_and_deadline() {
        let (mut state, config) = fresh();
        let env = GameEnv::new(Millis(1_000), &config);

        ApplyBuffAction {
            buff: Buff::Coin {
                multiplier: 2.0,
                duration_ms: 5_000,
            },
        }
        .apply(&mut state, &env, &mut Vec::new())
        .unwrap();

        assert_eq!(state.buffs.coin_multiplier, 2.0);
        assert_eq!(state.buffs.coin_buff_ends, Some(Millis(6_000)));
        assert!(state.buffs.coin_buff_active(Millis(5_999)));
        assert!(!state.buffs.coin_buff_active(Millis(6_000)));
    }

    #[test]
    fn sweep_reverts_expired_coin_buff() {
        let (mut state, config) = fresh();
        state.buffs.coin_multiplier = 3.0;
        state.buffs.coin_buff_ends = Some(Millis(999));
        let env = GameEnv::new(Millis(1_000), &config);

        ClearExpiredBuffsAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state.buffs.coin_multiplier, TempBuffs::NEUTRAL_MULTIPLIER);
        assert_eq!(state.buffs.coin_buff_ends, None);
    }

    #[test]
    fn sweep_leaves_active_buffs_alone() {
        let (mut state, config) = fresh();
        state.buffs.energy_regen_bonus = 2;
        state.buffs.energy_buff_ends = Some(Millis(10_000));
        let env = GameEnv::new(Millis(1_000), &config);

        let before = state.clone();
        ClearExpiredBuffsAction
            .apply(&mut state, &env, &mut Vec::new())
            .unwrap();

        assert_eq!(state, before);
    }
}
