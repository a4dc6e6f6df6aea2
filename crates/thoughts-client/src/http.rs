//! Reqwest implementation of the server API.

use crate::api::{ThoughtsApi, ThoughtsPage};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

#[derive(Serialize)]
struct NewThought<'a> {
    thought: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Deserialize)]
struct VapidKeyResponse {
    public_key: String,
}

/// HTTP client for a thoughts server.
#[derive(Debug, Clone)]
pub struct ThoughtsClient {
    base: Url,
    http: reqwest::Client,
}

impl ThoughtsClient {
    /// Create a client rooted at the server's base URL.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client with a preconfigured reqwest client.
    pub fn with_client(base: Url, http: reqwest::Client) -> Self {
        Self { base, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Status(response.status()))
        }
    }
}

#[async_trait]
impl ThoughtsApi for ThoughtsClient {
    async fn fetch_page(&self, page: u32) -> Result<ThoughtsPage> {
        debug!(page, "fetching thoughts page");

        let response = self
            .http
            .get(self.endpoint("/thoughts")?)
            .query(&[("page", page)])
            .send()
            .await?;
        Self::check_status(&response)?;

        response
            .json::<ThoughtsPage>()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    async fn post_thought(&self, text: &str) -> Result<()> {
        debug!(len = text.len(), "posting thought");

        let response = self
            .http
            .post(self.endpoint("/thoughts")?)
            .json(&NewThought { thought: text })
            .send()
            .await?;
        Self::check_status(&response)
    }

    async fn upload_image(&self, filename: &str, bytes: Vec<u8>, mime: &str) -> Result<String> {
        debug!(filename, size = bytes.len(), "uploading image");

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("/upload_image")?)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UploadFailed(response.status()));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Ok(body.url)
    }

    async fn vapid_public_key(&self) -> Result<String> {
        debug!("fetching VAPID public key");

        let response = self.http.get(self.endpoint("/vapid_public_key")?).send().await?;
        Self::check_status(&response)?;

        let body: VapidKeyResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Ok(body.public_key)
    }

    async fn send_subscription(&self, subscription: &serde_json::Value) -> Result<()> {
        debug!("sending push subscription to server");

        let response = self
            .http
            .post(self.endpoint("/subscription")?)
            .json(subscription)
            .send()
            .await?;
        Self::check_status(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_against_base() {
        let client = ThoughtsClient::new(Url::parse("http://localhost:8000/").unwrap());
        assert_eq!(
            client.endpoint("/thoughts").unwrap().as_str(),
            "http://localhost:8000/thoughts"
        );
        assert_eq!(
            client.endpoint("/vapid_public_key").unwrap().as_str(),
            "http://localhost:8000/vapid_public_key"
        );
    }

    #[test]
    fn test_new_thought_wire_shape() {
        let body = serde_json::to_value(NewThought { thought: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "thought": "hi" }));
    }

    #[test]
    fn test_page_wire_shape() {
        let page: ThoughtsPage = serde_json::from_value(serde_json::json!({
            "thoughts": [{ "text": "hello", "timestamp": "2024-01-01T00:00:00Z" }],
            "page": 2,
            "has_next": false,
            "has_prev": true
        }))
        .unwrap();

        assert_eq!(page.thoughts.len(), 1);
        assert_eq!(page.page, 2);
        assert!(page.has_prev);
    }
}
