//! Server API contract.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thoughts_core::Thought;

/// One page of the feed as `GET /thoughts?page=N` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtsPage {
    pub thoughts: Vec<Thought>,
    pub page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// The five operations the server exposes.
///
/// [`ThoughtsClient`](crate::ThoughtsClient) is the real implementation;
/// tests run the controller and the push flow against mocks of this trait.
#[async_trait]
pub trait ThoughtsApi: Send + Sync {
    /// `GET /thoughts?page=N`
    async fn fetch_page(&self, page: u32) -> Result<ThoughtsPage>;

    /// `POST /thoughts` with `{"thought": text}`. The response body is unused.
    async fn post_thought(&self, text: &str) -> Result<()>;

    /// `POST /upload_image` with the bytes as multipart field `file`.
    /// Returns the URL the server stored the image under.
    async fn upload_image(&self, filename: &str, bytes: Vec<u8>, mime: &str) -> Result<String>;

    /// `GET /vapid_public_key`, returning the URL-safe base64 key string.
    async fn vapid_public_key(&self) -> Result<String>;

    /// `POST /subscription` with the platform's subscription JSON, verbatim.
    async fn send_subscription(&self, subscription: &serde_json::Value) -> Result<()>;
}
