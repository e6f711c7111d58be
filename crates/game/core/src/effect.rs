//! Remote-sync commands emitted by transitions.
//!
//! The reducer never performs I/O. Actions that imply server work describe
//! it as [`SyncEffect`] values; the runtime executes them best-effort after
//! the local transition has committed.

use serde::{Deserialize, Serialize};

use crate::state::UserId;

/// Partial update for the remote user row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coins: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_taps: Option<u64>,
}

/// Partial update for the remote character row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satiety: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<u8>,
}

/// One fire-and-forget remote call implied by an applied action.
///
/// Effects are only emitted when a user is bound; the runtime spawns each
/// one as a detached task with no retry and no ordering guarantee, so the
/// remote side is eventually (not strictly) consistent with local state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEffect {
    /// Append a named action record to the remote event log.
    RecordAction {
        user_id: UserId,
        name: &'static str,
    },
    /// Push updated user counters.
    UpdateUser { user_id: UserId, patch: UserPatch },
    /// Push updated character wellbeing fields.
    UpdateCharacter {
        user_id: UserId,
        patch: CharacterPatch,
    },
}
