//! Auth service and its HTTP edge.
//!
//! [`AuthService`] ties the pieces together: validate the launch payload,
//! resolve the Telegram account through a [`UserDirectory`], and mint a
//! session token. [`router`] exposes it as `POST /auth/telegram`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use pet_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AuthError;
use crate::signature::{TelegramUser, validate_init_data};
use crate::token::SessionToken;

/// Resolves a Telegram account to a game user, creating one on first login.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_or_create(&self, user: &TelegramUser) -> Result<UserId, AuthError>;
}

/// In-memory directory: the Telegram id doubles as the game user id.
#[derive(Default)]
pub struct MemoryDirectory {
    known: RwLock<HashMap<i64, UserId>>,
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_or_create(&self, user: &TelegramUser) -> Result<UserId, AuthError> {
        let mut known = self
            .known
            .write()
            .map_err(|_| AuthError::Directory("directory lock poisoned".into()))?;
        let user_id = *known.entry(user.id).or_insert(UserId(user.id));
        Ok(user_id)
    }
}

pub struct AuthService {
    bot_token: String,
    directory: Arc<dyn UserDirectory>,
    max_init_age: Duration,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(bot_token: impl Into<String>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            bot_token: bot_token.into(),
            directory,
            max_init_age: Duration::hours(24),
            token_ttl: Duration::hours(12),
        }
    }

    pub fn with_max_init_age(mut self, max_init_age: Duration) -> Self {
        self.max_init_age = max_init_age;
        self
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Full login flow for one raw `initData` payload.
    pub async fn authenticate(
        &self,
        init_data: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, AuthError> {
        let validated = validate_init_data(init_data, &self.bot_token, now, self.max_init_age)?;
        let user_id = self.directory.find_or_create(&validated.user).await?;
        info!(%user_id, telegram_id = validated.user.id, "session issued");
        Ok(SessionToken::issue(user_id, now, self.token_ttl))
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub init_data: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// `POST /auth/telegram` edge for the service.
pub fn router(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth/telegram", post(authenticate_handler))
        .with_state(service)
}

async fn authenticate_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    match service.authenticate(&request.init_data, Utc::now()).await {
        Ok(token) => Ok(Json(AuthResponse {
            user_id: token.user_id,
            token: token.token,
            expires_at: token.expires_at,
        })),
        Err(e) => {
            warn!(error = %e, "authentication failed");
            Err((status_for(&e), e.to_string()))
        }
    }
}

fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::InvalidSignature | AuthError::Stale { .. } => StatusCode::UNAUTHORIZED,
        AuthError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const BOT_TOKEN: &str = "12345:test-token";

    fn signed_init_data(telegram_id: i64, auth_date: i64) -> String {
        let user = format!(r#"{{"id":{telegram_id},"first_name":"Orey"}}"#);
        let mut entries = vec![
            format!("auth_date={auth_date}"),
            format!("user={user}"),
        ];
        entries.sort();
        let check_string = entries.join("\n");

        let mut outer = Hmac::<Sha256>::new_from_slice(b"WebAppData").unwrap();
        outer.update(BOT_TOKEN.as_bytes());
        let secret = outer.finalize().into_bytes();
        let mut mac = Hmac::<Sha256>::new_from_slice(&secret).unwrap();
        mac.update(check_string.as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());

        let mut encoded = url::form_urlencoded::Serializer::new(String::new());
        encoded.append_pair("auth_date", &auth_date.to_string());
        encoded.append_pair("user", &user);
        encoded.append_pair("hash", &hash);
        encoded.finish()
    }

    #[tokio::test]
    async fn authenticate_issues_a_token_for_a_valid_payload() {
        let service = AuthService::new(BOT_TOKEN, Arc::new(MemoryDirectory::default()));
        let now = Utc.timestamp_opt(1_700_000_060, 0).unwrap();

        let token = service
            .authenticate(&signed_init_data(42, 1_700_000_000), now)
            .await
            .unwrap();

        assert_eq!(token.user_id, UserId(42));
        assert!(!token.is_expired(now));
    }

    #[tokio::test]
    async fn repeat_logins_resolve_to_the_same_user() {
        let service = AuthService::new(BOT_TOKEN, Arc::new(MemoryDirectory::default()));
        let now = Utc.timestamp_opt(1_700_000_060, 0).unwrap();

        let first = service
            .authenticate(&signed_init_data(7, 1_700_000_000), now)
            .await
            .unwrap();
        let second = service
            .authenticate(&signed_init_data(7, 1_700_000_000), now)
            .await
            .unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn forged_payload_is_refused() {
        let service = AuthService::new(BOT_TOKEN, Arc::new(MemoryDirectory::default()));
        let now = Utc.timestamp_opt(1_700_000_060, 0).unwrap();
        let forged = signed_init_data(42, 1_700_000_000).replace("42", "43");

        let err = service.authenticate(&forged, now).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }
}
