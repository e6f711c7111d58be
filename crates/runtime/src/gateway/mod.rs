//! Remote data gateway.
//!
//! The gateway abstracts the relational backend: recording user action
//! events, patching character and user rows, and reading the weekly rank.
//! All writes initiated by the simulation worker are fire-and-forget; a
//! failed call is logged and never retried, because the local snapshot is
//! the source of truth between sessions.

mod http;
mod memory;

pub use http::HttpGateway;
pub use memory::{NullGateway, RecordedCall, RecordingGateway};

use async_trait::async_trait;
use pet_core::{CharacterPatch, UserId, UserPatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed")]
    Transport(#[from] reqwest::Error),

    #[error("gateway responded with status {status}")]
    Status { status: u16 },

    #[error("gateway response could not be decoded")]
    Decode(#[source] serde_json::Error),

    #[error("gateway is offline")]
    Offline,
}

#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Appends one named action event for the user's activity feed.
    async fn record_user_action(&self, user_id: UserId, action: &str) -> Result<(), GatewayError>;

    /// Patches the character row with the fields present in the patch.
    async fn update_character(
        &self,
        user_id: UserId,
        patch: &CharacterPatch,
    ) -> Result<(), GatewayError>;

    /// Patches the user row (coin balance, tap totals).
    async fn update_user(&self, user_id: UserId, patch: &UserPatch) -> Result<(), GatewayError>;

    /// Reads the user's current weekly leaderboard position.
    async fn get_user_rank(&self, user_id: UserId) -> Result<u32, GatewayError>;
}
