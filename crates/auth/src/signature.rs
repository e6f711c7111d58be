//! Telegram `initData` signature verification.
//!
//! Telegram signs the Mini App launch payload with
//! `HMAC_SHA256(key = HMAC_SHA256("WebAppData", bot_token), msg = data_check_string)`,
//! where the data-check string is every key=value pair except `hash`,
//! sorted by key and joined with newlines. Verification is constant-time
//! via the hmac crate's tag comparison.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Key prefix fixed by the Telegram Mini App protocol.
const WEB_APP_DATA: &[u8] = b"WebAppData";

/// The Telegram account embedded in `initData`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// A validated launch payload.
#[derive(Clone, Debug)]
pub struct InitData {
    pub user: TelegramUser,
    pub auth_date: DateTime<Utc>,
}

/// Validates a raw `initData` query string against the bot token.
///
/// Checks the HMAC signature first, then rejects payloads whose `auth_date`
/// is older than `max_age` at `now`, and finally decodes the embedded user.
pub fn validate_init_data(
    init_data: &str,
    bot_token: &str,
    now: DateTime<Utc>,
    max_age: Duration,
) -> Result<InitData, AuthError> {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(init_data.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        return Err(AuthError::MalformedInitData);
    }

    let provided_hash = pairs
        .iter()
        .find(|(k, _)| k == "hash")
        .map(|(_, v)| v.as_str())
        .ok_or(AuthError::MissingField("hash"))?;
    let provided_hash = hex::decode(provided_hash).map_err(|_| AuthError::MalformedHash)?;

    let check_string = data_check_string(&pairs);
    let mut mac = signing_key(bot_token);
    mac.update(check_string.as_bytes());
    mac.verify_slice(&provided_hash)
        .map_err(|_| AuthError::InvalidSignature)?;

    let auth_date_raw = pairs
        .iter()
        .find(|(k, _)| k == "auth_date")
        .map(|(_, v)| v.as_str())
        .ok_or(AuthError::MissingField("auth_date"))?;
    let auth_date_secs: i64 = auth_date_raw
        .parse()
        .map_err(|_| AuthError::MalformedInitData)?;
    let auth_date = Utc
        .timestamp_opt(auth_date_secs, 0)
        .single()
        .ok_or(AuthError::MalformedInitData)?;
    let age = now.signed_duration_since(auth_date);
    if age > max_age {
        return Err(AuthError::Stale {
            age_secs: age.num_seconds(),
        });
    }

    let user_raw = pairs
        .iter()
        .find(|(k, _)| k == "user")
        .map(|(_, v)| v.as_str())
        .ok_or(AuthError::MissingField("user"))?;
    let user: TelegramUser = serde_json::from_str(user_raw).map_err(AuthError::MalformedUser)?;

    Ok(InitData { user, auth_date })
}

/// Builds the newline-joined, key-sorted check string, excluding `hash`.
fn data_check_string(pairs: &[(String, String)]) -> String {
    let mut entries: Vec<String> = pairs
        .iter()
        .filter(|(k, _)| k != "hash")
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    entries.sort();
    entries.join("\n")
}

/// Derives the per-bot signing key mandated by the protocol.
fn signing_key(bot_token: &str) -> HmacSha256 {
    let mut outer =
        HmacSha256::new_from_slice(WEB_APP_DATA).expect("hmac accepts any key length");
    outer.update(bot_token.as_bytes());
    let secret = outer.finalize().into_bytes();
    HmacSha256::new_from_slice(&secret).expect("hmac accepts any key length")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_TOKEN: &str = "110201543:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    /// Signs the given pairs the way Telegram's backend would.
    fn sign(pairs: &[(String, String)], bot_token: &str) -> String {
        let mut mac = signing_key(bot_token);
        mac.update(data_check_string(pairs).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn init_data_with(auth_date: i64) -> String {
        let user = r#"{"id":42,"first_name":"Orey","username":"orey_fan"}"#;
        let pairs = vec![
            ("query_id".to_owned(), "AAEtest".to_owned()),
            ("user".to_owned(), user.to_owned()),
            ("auth_date".to_owned(), auth_date.to_string()),
        ];
        let hash = sign(&pairs, BOT_TOKEN);
        let mut encoded = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &pairs {
            encoded.append_pair(k, v);
        }
        encoded.append_pair("hash", &hash);
        encoded.finish()
    }

    #[test]
    fn valid_payload_passes_and_decodes_the_user() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let init_data = init_data_with(1_700_000_000);

        let validated =
            validate_init_data(&init_data, BOT_TOKEN, now, Duration::hours(24)).unwrap();

        assert_eq!(validated.user.id, 42);
        assert_eq!(validated.user.first_name, "Orey");
        assert_eq!(validated.user.username.as_deref(), Some("orey_fan"));
        assert_eq!(validated.auth_date.timestamp(), 1_700_000_000);
    }

    #[test]
    fn tampered_field_is_rejected() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let init_data = init_data_with(1_700_000_000).replace("Orey", "Mallory");

        let err =
            validate_init_data(&init_data, BOT_TOKEN, now, Duration::hours(24)).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn wrong_bot_token_is_rejected() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let init_data = init_data_with(1_700_000_000);

        let err =
            validate_init_data(&init_data, "000:wrong", now, Duration::hours(24)).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn stale_auth_date_is_rejected() {
        let now = Utc.timestamp_opt(1_700_090_000, 0).unwrap();
        let init_data = init_data_with(1_700_000_000);

        let err =
            validate_init_data(&init_data, BOT_TOKEN, now, Duration::hours(24)).unwrap_err();
        assert!(matches!(err, AuthError::Stale { .. }));
    }

    #[test]
    fn missing_hash_is_rejected() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let err = validate_init_data(
            "auth_date=1700000000&user=%7B%22id%22%3A1%2C%22first_name%22%3A%22x%22%7D",
            BOT_TOKEN,
            now,
            Duration::hours(24),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("hash")));
    }
}
