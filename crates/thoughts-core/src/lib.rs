//! # Thoughts Core
//!
//! Domain model and pure rendering logic for the thoughts feed.
//!
//! Everything in this crate is synchronous and side-effect free: a fetched
//! page of posts goes in, a render description comes out. The UI layer
//! decides how a [`RenderedPost`] is painted; nothing here touches the
//! terminal or the network, which keeps the feed semantics testable on
//! their own.
//!
//! ## Core flow
//!
//! ```text
//! Thought { text, timestamp }
//!     │  classify (image-URL heuristic)
//!     ▼
//! PostContent::Image { url }            trimmed text is a bare image URL
//! PostContent::Text { segments }        everything else, URLs split out
//!     │  + long-form date ("January 1, 2024")
//!     ▼
//! RenderedPost
//! ```

pub mod content;
pub mod page;
pub mod render;
pub mod thought;

pub use content::{is_image_url, linkify, Segment};
pub use page::PageState;
pub use render::{long_form_date, render_post, render_post_in, PostContent, RenderedPost};
pub use thought::{PostedAt, Thought};

/// Result type for thoughts-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in thoughts-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized timestamp: {0}")]
    Timestamp(String),
}
