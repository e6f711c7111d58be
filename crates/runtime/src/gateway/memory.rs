use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use pet_core::{CharacterPatch, UserId, UserPatch};

use super::{GatewayError, RemoteGateway};

/// Gateway for fully offline sessions: writes vanish, rank is unavailable.
#[derive(Default)]
pub struct NullGateway;

#[async_trait]
impl RemoteGateway for NullGateway {
    async fn record_user_action(&self, _: UserId, _: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn update_character(&self, _: UserId, _: &CharacterPatch) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn update_user(&self, _: UserId, _: &UserPatch) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn get_user_rank(&self, _: UserId) -> Result<u32, GatewayError> {
        Err(GatewayError::Offline)
    }
}

/// One call observed by [`RecordingGateway`].
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCall {
    Action { user_id: UserId, name: String },
    Character { user_id: UserId, patch: CharacterPatch },
    User { user_id: UserId, patch: UserPatch },
    Rank { user_id: UserId },
}

/// Test gateway that records every call and serves a configurable rank.
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<RecordedCall>>,
    rank: AtomicU32,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rank(rank: u32) -> Self {
        let gateway = Self::default();
        gateway.rank.store(rank, Ordering::Relaxed);
        gateway
    }

    pub fn set_rank(&self, rank: u32) {
        self.rank.store(rank, Ordering::Relaxed);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("recording gateway lock").clone()
    }

    fn push(&self, call: RecordedCall) {
        self.calls.lock().expect("recording gateway lock").push(call);
    }
}

#[async_trait]
impl RemoteGateway for RecordingGateway {
    async fn record_user_action(&self, user_id: UserId, action: &str) -> Result<(), GatewayError> {
        self.push(RecordedCall::Action {
            user_id,
            name: action.to_owned(),
        });
        Ok(())
    }

    async fn update_character(
        &self,
        user_id: UserId,
        patch: &CharacterPatch,
    ) -> Result<(), GatewayError> {
        self.push(RecordedCall::Character {
            user_id,
            patch: patch.clone(),
        });
        Ok(())
    }

    async fn update_user(&self, user_id: UserId, patch: &UserPatch) -> Result<(), GatewayError> {
        self.push(RecordedCall::User {
            user_id,
            patch: patch.clone(),
        });
        Ok(())
    }

    async fn get_user_rank(&self, user_id: UserId) -> Result<u32, GatewayError> {
        self.push(RecordedCall::Rank { user_id });
        Ok(self.rank.load(Ordering::Relaxed))
    }
}
