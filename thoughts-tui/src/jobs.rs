//! Background jobs that talk to the server without blocking the UI.
//!
//! Every user action that touches the network is spawned onto the runtime;
//! outcomes come back over a channel the app drains on tick. The feed
//! controller itself guards against out-of-order page responses, so jobs
//! can overlap freely.

use thoughts_client::{FeedController, SubmitOutcome, ThoughtsClient};
use thoughts_push::UnsupportedPlatform;
use tokio::sync::mpsc;
use tracing::debug;

/// Outcome of a finished background job.
#[derive(Debug)]
pub enum JobOutcome {
    /// A page load finished (applied or not); re-read the snapshot.
    FeedChanged,
    /// A submission attempt finished.
    Submitted(SubmitOutcome),
    /// An image upload finished with the stored URL, or failed.
    UploadFinished(Result<String, String>),
    /// The push subscription flow finished; the message is the alert text.
    SubscribeFinished(Result<(), String>),
}

/// Spawns jobs and collects their outcomes.
pub struct Jobs {
    controller: FeedController<ThoughtsClient>,
    tx: mpsc::UnboundedSender<JobOutcome>,
    rx: mpsc::UnboundedReceiver<JobOutcome>,
}

impl Jobs {
    pub fn new(controller: FeedController<ThoughtsClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { controller, tx, rx }
    }

    /// Try to receive a finished outcome (non-blocking).
    pub fn try_recv(&mut self) -> Option<JobOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn load_page(&self, page: u32) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            controller.load_page(page).await;
            let _ = tx.send(JobOutcome::FeedChanged);
        });
    }

    pub fn refresh(&self) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            controller.refresh().await;
            let _ = tx.send(JobOutcome::FeedChanged);
        });
    }

    pub fn load_older(&self) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            controller.load_older().await;
            let _ = tx.send(JobOutcome::FeedChanged);
        });
    }

    pub fn load_newer(&self) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            controller.load_newer().await;
            let _ = tx.send(JobOutcome::FeedChanged);
        });
    }

    pub fn submit(&self, text: String) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = controller.submit(&text).await;
            let _ = tx.send(JobOutcome::Submitted(outcome));
        });
    }

    pub fn upload(&self, filename: String, bytes: Vec<u8>, mime: &'static str) {
        debug!(filename, size = bytes.len(), "starting pasted image upload");
        let controller = self.controller.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = controller
                .upload_image(&filename, bytes, mime)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(JobOutcome::UploadFinished(result));
        });
    }

    /// Run the push subscription flow. The terminal build has no push
    /// service attached, so the platform reports unavailability and the
    /// flow ends in the one user-facing alert.
    pub fn subscribe(&self) {
        let api = self.controller.api();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = thoughts_push::subscribe(api.as_ref(), &UnsupportedPlatform)
                .await
                .map(|_| ())
                .map_err(|e| format!("Subscription failed: {e}"));
            let _ = tx.send(JobOutcome::SubscribeFinished(result));
        });
    }

    /// Current view of the feed.
    pub fn snapshot(&self) -> thoughts_client::FeedSnapshot {
        self.controller.snapshot()
    }
}
