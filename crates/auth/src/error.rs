use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("init data is not a valid query string")]
    MalformedInitData,

    #[error("init data is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("init data hash is not valid hex")]
    MalformedHash,

    #[error("init data signature mismatch")]
    InvalidSignature,

    #[error("init data is stale (issued {age_secs}s ago)")]
    Stale { age_secs: i64 },

    #[error("embedded user payload could not be decoded")]
    MalformedUser(#[source] serde_json::Error),

    #[error("user directory lookup failed")]
    Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}
