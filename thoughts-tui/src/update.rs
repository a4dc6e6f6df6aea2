//! App-update notification.
//!
//! Watches the installed binary on disk. When its modification time moves
//! past the running process's baseline, a newer build has been installed
//! and is waiting; the refresh affordance changes its label and activating
//! it re-execs into the new binary. A one-shot flag guards against a
//! duplicate restart.

use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, info};

/// Whether a newer build is waiting to take over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Current,
    Waiting,
}

/// What the refresh affordance should do when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshAction {
    /// No update waiting: plain full reload of the client.
    Reload,
    /// A new build is waiting: hand control over to it.
    Activate,
}

/// Watches one binary for a newer installed version.
#[derive(Debug)]
pub struct UpdateNotifier {
    binary: Option<PathBuf>,
    baseline: Option<SystemTime>,
    status: UpdateStatus,
    refresh_requested: bool,
}

impl UpdateNotifier {
    /// Watch the currently running executable.
    pub fn for_current_exe() -> Self {
        match std::env::current_exe() {
            Ok(path) => Self::watch(path),
            Err(e) => {
                debug!(error = %e, "can't resolve current executable; update checks disabled");
                Self {
                    binary: None,
                    baseline: None,
                    status: UpdateStatus::Current,
                    refresh_requested: false,
                }
            }
        }
    }

    /// Watch an explicit binary path.
    pub fn watch(binary: PathBuf) -> Self {
        let baseline = modified(&binary);
        Self {
            binary: Some(binary),
            baseline,
            status: UpdateStatus::Current,
            refresh_requested: false,
        }
    }

    pub fn status(&self) -> UpdateStatus {
        self.status
    }

    /// Label for the refresh affordance.
    pub fn refresh_label(&self) -> &'static str {
        match self.status {
            UpdateStatus::Current => "refresh",
            UpdateStatus::Waiting => "New version available. Refresh!",
        }
    }

    /// Re-check the binary on disk.
    pub fn poll(&mut self) {
        if self.status == UpdateStatus::Waiting {
            return;
        }
        let current = self.binary.as_deref().and_then(modified);
        self.observe(current);
    }

    /// Apply an observed modification time.
    fn observe(&mut self, current: Option<SystemTime>) {
        if let (Some(baseline), Some(current)) = (self.baseline, current) {
            if current > baseline {
                info!("new version installed and waiting");
                self.status = UpdateStatus::Waiting;
            }
        }
    }

    /// Resolve a press of the refresh affordance.
    ///
    /// The first press yields the action to take; any further press is
    /// swallowed so the client restarts exactly once.
    pub fn request_refresh(&mut self) -> Option<RefreshAction> {
        if self.refresh_requested {
            return None;
        }
        self.refresh_requested = true;

        Some(match self.status {
            UpdateStatus::Waiting => RefreshAction::Activate,
            UpdateStatus::Current => RefreshAction::Reload,
        })
    }
}

fn modified(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
