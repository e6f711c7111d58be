use chrono::{DateTime, Duration, Utc};
use pet_core::UserId;
use rand::RngCore;
use serde::Serialize;

/// Bearer token for one authenticated session.
///
/// Opaque 32 random bytes, hex-encoded. Tokens are not self-describing;
/// the issuing service keeps the token-to-user mapping.
#[derive(Clone, Debug, Serialize)]
pub struct SessionToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn issue(user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            token: hex::encode(bytes),
            user_id,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_expire() {
        let now = Utc::now();
        let a = SessionToken::issue(UserId(1), now, Duration::hours(1));
        let b = SessionToken::issue(UserId(1), now, Duration::hours(1));

        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), 64);
        assert!(!a.is_expired(now));
        assert!(a.is_expired(now + Duration::hours(2)));
    }
}
