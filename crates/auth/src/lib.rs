//! Telegram Mini App authentication.
//!
//! Validates the signed `initData` payload Telegram hands to a Mini App,
//! resolves the Telegram account to a game user, and issues short-lived
//! session tokens. Exposed both as a library ([`AuthService`]) and as an
//! axum router for the auth edge endpoint.

pub mod error;
pub mod service;
pub mod signature;
pub mod token;

pub use error::AuthError;
pub use service::{AuthRequest, AuthResponse, AuthService, MemoryDirectory, UserDirectory, router};
pub use signature::{InitData, TelegramUser, validate_init_data};
pub use token::SessionToken;
