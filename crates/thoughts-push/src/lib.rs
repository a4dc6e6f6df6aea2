//! # Thoughts Push
//!
//! Web-push subscription flow: fetch the server's VAPID public key, decode
//! it from URL-safe base64, wait for the push platform to become ready,
//! request a subscription, and deliver the subscription object back to the
//! server.
//!
//! The push platform itself - the thing that asks the user for permission
//! and mints `{endpoint, keys}` objects - is an external collaborator, so
//! it sits behind the [`PushPlatform`] trait. Hosts that embed the client
//! next to a real push service implement it; plain terminal builds use
//! [`UnsupportedPlatform`] and surface the single user-facing alert.

pub mod key;
pub mod platform;
pub mod subscribe;

pub use key::decode_public_key;
pub use platform::{PushPlatform, PushSubscription, SubscriptionKeys, UnsupportedPlatform};
pub use subscribe::subscribe;

/// Result type for thoughts-push operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while subscribing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("couldn't decode server public key: {0}")]
    KeyDecode(String),

    #[error("notification permission was denied")]
    PermissionDenied,

    #[error("push is not available on this platform")]
    Unavailable,

    #[error("push platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Api(#[from] thoughts_client::Error),

    #[error("couldn't serialize subscription: {0}")]
    Serialize(#[from] serde_json::Error),
}
