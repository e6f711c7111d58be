use crate::config::GameConfig;
use crate::state::Millis;

/// Deterministic environment facts supplied to every transition.
///
/// The engine never reads the wall clock itself; the dispatching layer
/// captures `now` once per action so replaying the same action sequence with
/// the same environments reproduces the same states.
#[derive(Clone, Copy, Debug)]
pub struct GameEnv<'a> {
    /// Wall-clock timestamp the action is applied at.
    pub now: Millis,
    /// Rule constants and tunables.
    pub config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(now: Millis, config: &'a GameConfig) -> Self {
        Self { now, config }
    }
}
