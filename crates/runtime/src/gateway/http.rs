use async_trait::async_trait;
use pet_core::{CharacterPatch, UserId, UserPatch};
use serde::Deserialize;
use serde_json::json;

use super::{GatewayError, RemoteGateway};

/// Gateway backed by the hosted REST backend.
///
/// Endpoints follow the backend's row-per-table shape: action events append
/// to `user_actions`, user and character rows are patched by id, and the
/// weekly rank is read from an RPC endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct RankResponse {
    rank: u32,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn check(response: &reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn record_user_action(&self, user_id: UserId, action: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("rest/v1/user_actions"))
            .bearer_auth(&self.api_key)
            .json(&json!({ "user_id": user_id, "action": action }))
            .send()
            .await?;
        Self::check(&response)
    }

    async fn update_character(
        &self,
        user_id: UserId,
        patch: &CharacterPatch,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .patch(self.url(&format!("rest/v1/characters?user_id=eq.{}", user_id.0)))
            .bearer_auth(&self.api_key)
            .json(patch)
            .send()
            .await?;
        Self::check(&response)
    }

    async fn update_user(&self, user_id: UserId, patch: &UserPatch) -> Result<(), GatewayError> {
        let response = self
            .client
            .patch(self.url(&format!("rest/v1/users?id=eq.{}", user_id.0)))
            .bearer_auth(&self.api_key)
            .json(patch)
            .send()
            .await?;
        Self::check(&response)
    }

    async fn get_user_rank(&self, user_id: UserId) -> Result<u32, GatewayError> {
        let response = self
            .client
            .post(self.url("rest/v1/rpc/get_user_rank"))
            .bearer_auth(&self.api_key)
            .json(&json!({ "target_user_id": user_id }))
            .send()
            .await?;
        Self::check(&response)?;
        let body: RankResponse = response
            .json::<RankResponse>()
            .await
            .map_err(GatewayError::Transport)?;
        Ok(body.rank)
    }
}
