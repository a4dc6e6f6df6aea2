//! Feed controller: page state, rendered feed, and the staleness guard.

use crate::api::{ThoughtsApi, ThoughtsPage};
use crate::Result;
use std::sync::{Arc, Mutex, MutexGuard};
use thoughts_core::{render_post, PageState, RenderedPost};
use tracing::{debug, warn};

/// Outcome of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace-only; nothing was sent.
    Ignored,
    /// The post was accepted and the feed reset to page 1.
    Posted,
    /// The POST failed; the inline error carries the details and the
    /// caller should keep the input for retry.
    Failed,
}

/// A copy of the controller's view, cheap enough to take every UI tick.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Rendered posts of the last successfully fetched page, server order.
    pub posts: Vec<RenderedPost>,
    pub page: PageState,
    /// Inline error from the most recent failed load or submission.
    pub error: Option<String>,
    /// Whether a load is in flight.
    pub loading: bool,
}

#[derive(Debug, Default)]
struct FeedViewState {
    posts: Vec<RenderedPost>,
    page: PageState,
    error: Option<String>,
    loading: bool,
    /// Token of the most recently begun load. A response is applied only
    /// if no newer load has begun since it started, so a late response
    /// from an earlier request can never overwrite a newer page.
    generation: u64,
}

/// Owns the displayed feed and every operation that mutates it.
///
/// Cloning shares the same underlying state, so the UI can hand clones to
/// background tasks and keep reading snapshots from its own handle.
pub struct FeedController<A: ThoughtsApi> {
    api: Arc<A>,
    state: Arc<Mutex<FeedViewState>>,
}

impl<A: ThoughtsApi> Clone for FeedController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: ThoughtsApi> FeedController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(FeedViewState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedViewState> {
        self.state.lock().expect("feed state lock poisoned")
    }

    /// Current view of the feed.
    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state();
        FeedSnapshot {
            posts: state.posts.clone(),
            page: state.page,
            error: state.error.clone(),
            loading: state.loading,
        }
    }

    /// Start a load, returning the token its response must present.
    fn begin_load(&self) -> u64 {
        let mut state = self.state();
        state.generation += 1;
        state.loading = true;
        state.generation
    }

    /// Apply a finished load. Returns false when the response was stale
    /// and discarded. On failure the previous feed view is retained and
    /// the error surfaces inline instead.
    fn complete_load(&self, token: u64, result: Result<ThoughtsPage>) -> bool {
        let mut state = self.state();
        if token != state.generation {
            debug!(token, current = state.generation, "discarding stale page response");
            return false;
        }
        state.loading = false;

        match result {
            Ok(fetched) => {
                state.posts = fetched.thoughts.iter().map(render_post).collect();
                state
                    .page
                    .apply(fetched.page, fetched.has_next, fetched.has_prev);
                state.error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, "feed load failed");
                state.error = Some(format!("couldn't load thoughts: {e}"));
                false
            }
        }
    }

    /// Fetch a page and replace the displayed feed with it.
    ///
    /// Returns true when the response was applied; false when it failed or
    /// lost to a newer request.
    pub async fn load_page(&self, page: u32) -> bool {
        let token = self.begin_load();
        let result = self.api.fetch_page(page).await;
        self.complete_load(token, result)
    }

    /// Re-fetch the page currently displayed.
    pub async fn refresh(&self) -> bool {
        let page = self.state().page.current;
        self.load_page(page).await
    }

    /// Move one page toward older posts, if the server reported one.
    pub async fn load_older(&self) -> bool {
        let target = {
            let state = self.state();
            if !state.page.has_next {
                return false;
            }
            state.page.older()
        };
        self.load_page(target).await
    }

    /// Move one page toward newer posts, if the server reported one.
    pub async fn load_newer(&self) -> bool {
        let target = {
            let state = self.state();
            if !state.page.has_prev {
                return false;
            }
            state.page.newer()
        };
        self.load_page(target).await
    }

    /// Submit the composer's input as a new post.
    ///
    /// Blank input is ignored without touching the server. On success the
    /// feed returns to page 1 so the new post is visible.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        match self.api.post_thought(input).await {
            Ok(()) => {
                self.load_page(1).await;
                SubmitOutcome::Posted
            }
            Err(e) => {
                warn!(error = %e, "posting thought failed");
                self.state().error = Some(format!("couldn't post: {e}"));
                SubmitOutcome::Failed
            }
        }
    }

    /// Upload pasted image bytes, returning the URL the composer should
    /// adopt in place of the pasted payload.
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>, mime: &str) -> Result<String> {
        self.api.upload_image(filename, bytes, mime).await
    }

    /// Shared handle to the underlying API, for flows that sit next to the
    /// feed (push subscription).
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }
}
