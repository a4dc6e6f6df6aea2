//! # Thoughts Client
//!
//! HTTP client and feed controller for the thoughts server.
//!
//! [`ThoughtsClient`] speaks the five server endpoints over reqwest;
//! [`ThoughtsApi`] is the seam that lets everything above it run against a
//! mock. [`FeedController`] owns the page state and the rendered feed,
//! guards against stale responses from overlapping loads, and keeps load
//! and submission failures as a non-blocking inline error instead of
//! tearing down the current view.

pub mod api;
pub mod controller;
pub mod http;

pub use api::{ThoughtsApi, ThoughtsPage};
pub use controller::{FeedController, FeedSnapshot, SubmitOutcome};
pub use http::ThoughtsClient;

/// Result type for thoughts-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the server
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("upload failed with {0}")]
    UploadFailed(reqwest::StatusCode),

    #[error("invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
