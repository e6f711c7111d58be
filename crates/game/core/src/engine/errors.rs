use thiserror::Error;

use crate::action::ActionError;

/// Phase of the transition pipeline a failure occurred in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Failure of a single action execution, tagged with the pipeline phase.
///
/// A `PreValidate` rejection is ordinary control flow (the action was a
/// no-op); later phases indicate a rule bug and are logged loudly by the
/// runtime.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{action} rejected during {}: {source}", phase.as_str())]
pub struct ExecuteError {
    /// Snake_case action name.
    pub action: String,
    pub phase: TransitionPhase,
    #[source]
    pub source: ActionError,
}

impl ExecuteError {
    pub fn new(action: &str, phase: TransitionPhase, source: ActionError) -> Self {
        Self {
            action: action.to_owned(),
            phase,
            source,
        }
    }

    /// True when the failure is a pre-validate rejection (expected no-op).
    pub fn is_rejection(&self) -> bool {
        self.phase == TransitionPhase::PreValidate
    }
}
