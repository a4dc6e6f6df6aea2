//! The subscription flow, end to end.

use crate::key::decode_public_key;
use crate::platform::{PushPlatform, PushSubscription};
use crate::Result;
use thoughts_client::ThoughtsApi;
use tracing::{debug, info};

/// Subscribe to push notifications.
///
/// Fetches the server's VAPID public key, decodes it, waits for the push
/// platform to become ready, requests a subscription with the decoded key,
/// and POSTs the resulting subscription object to the server. Any failure
/// aborts the flow; the caller surfaces it as a single user-visible alert
/// and does not retry.
pub async fn subscribe<A, P>(api: &A, platform: &P) -> Result<PushSubscription>
where
    A: ThoughtsApi + ?Sized,
    P: PushPlatform + ?Sized,
{
    info!("subscribing to push notifications");

    let raw_key = api.vapid_public_key().await?;
    debug!("fetched VAPID public key");

    let server_key = decode_public_key(&raw_key)?;
    debug!(key_len = server_key.len(), "decoded application server key");

    platform.ready().await?;
    debug!("push platform ready");

    let subscription = platform.subscribe(&server_key).await?;
    debug!(endpoint = %subscription.endpoint, "platform issued subscription");

    api.send_subscription(&serde_json::to_value(&subscription)?)
        .await?;
    info!("subscription delivered to server");

    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{SubscriptionKeys, UnsupportedPlatform};
    use crate::Error;
    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::Mutex;
    use thoughts_client::{Result as ApiResult, ThoughtsPage};

    const KEY_BYTES: [u8; 5] = [4, 8, 15, 16, 23];

    struct MockApi {
        key: String,
        sent: Mutex<Vec<serde_json::Value>>,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                key: URL_SAFE_NO_PAD.encode(KEY_BYTES),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ThoughtsApi for MockApi {
        async fn fetch_page(&self, _: u32) -> ApiResult<ThoughtsPage> {
            unreachable!("subscription flow never fetches the feed")
        }

        async fn post_thought(&self, _: &str) -> ApiResult<()> {
            unreachable!()
        }

        async fn upload_image(&self, _: &str, _: Vec<u8>, _: &str) -> ApiResult<String> {
            unreachable!()
        }

        async fn vapid_public_key(&self) -> ApiResult<String> {
            Ok(self.key.clone())
        }

        async fn send_subscription(&self, subscription: &serde_json::Value) -> ApiResult<()> {
            self.sent.lock().unwrap().push(subscription.clone());
            Ok(())
        }
    }

    struct MockPlatform {
        seen_key: Mutex<Option<Vec<u8>>>,
        deny: bool,
    }

    #[async_trait]
    impl PushPlatform for MockPlatform {
        async fn ready(&self) -> Result<()> {
            Ok(())
        }

        async fn subscribe(&self, application_server_key: &[u8]) -> Result<PushSubscription> {
            if self.deny {
                return Err(Error::PermissionDenied);
            }
            *self.seen_key.lock().unwrap() = Some(application_server_key.to_vec());
            Ok(PushSubscription {
                endpoint: "https://push.example/ep/1".into(),
                keys: SubscriptionKeys {
                    p256dh: "pk".into(),
                    auth: "a".into(),
                },
            })
        }
    }

    #[tokio::test]
    async fn test_full_flow_delivers_subscription() {
        let api = MockApi::new();
        let platform = MockPlatform {
            seen_key: Mutex::new(None),
            deny: false,
        };

        let subscription = subscribe(&api, &platform).await.unwrap();
        assert_eq!(subscription.endpoint, "https://push.example/ep/1");

        // Platform received the decoded key bytes, not the base64 text.
        assert_eq!(
            platform.seen_key.lock().unwrap().as_deref(),
            Some(&KEY_BYTES[..])
        );

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["endpoint"], "https://push.example/ep/1");
        assert_eq!(sent[0]["keys"]["auth"], "a");
    }

    #[tokio::test]
    async fn test_permission_denial_aborts_without_posting() {
        let api = MockApi::new();
        let platform = MockPlatform {
            seen_key: Mutex::new(None),
            deny: true,
        };

        let result = subscribe(&api, &platform).await;
        assert!(matches!(result, Err(Error::PermissionDenied)));
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_platform_aborts() {
        let api = MockApi::new();
        let result = subscribe(&api, &UnsupportedPlatform).await;
        assert!(matches!(result, Err(Error::Unavailable)));
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_key_from_server_aborts() {
        let mut api = MockApi::new();
        api.key = "!!! definitely not base64 !!!".into();
        let platform = MockPlatform {
            seen_key: Mutex::new(None),
            deny: false,
        };

        let result = subscribe(&api, &platform).await;
        assert!(matches!(result, Err(Error::KeyDecode(_))));
        assert!(api.sent.lock().unwrap().is_empty());
    }
}
