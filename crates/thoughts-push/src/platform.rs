//! The push platform seam.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Key material the platform mints alongside a subscription endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A platform-issued push subscription.
///
/// Treated as opaque: it is serialized and handed to the server once, never
/// retained or interpreted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Whatever actually delivers notifications: a browser push manager when
/// the client runs embedded, or nothing at all in a bare terminal.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Resolve once the platform's delivery worker is ready. This may
    /// suspend indefinitely; no timeout is applied.
    async fn ready(&self) -> Result<()>;

    /// Request permission and a subscription bound to the given
    /// application server key.
    async fn subscribe(&self, application_server_key: &[u8]) -> Result<PushSubscription>;
}

/// Platform for builds with no push service attached. Every call reports
/// unavailability, which the UI surfaces as the one subscription alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

#[async_trait]
impl PushPlatform for UnsupportedPlatform {
    async fn ready(&self) -> Result<()> {
        Err(Error::Unavailable)
    }

    async fn subscribe(&self, _application_server_key: &[u8]) -> Result<PushSubscription> {
        Err(Error::Unavailable)
    }
}
