//! Application state and behavior for the thoughts TUI.

use crate::jobs::{JobOutcome, Jobs};
use crate::paste::{classify, Paste};
use crate::theme::Theme;
use crate::update::{RefreshAction, UpdateNotifier};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thoughts_client::{FeedController, FeedSnapshot, SubmitOutcome, ThoughtsClient};
use tracing::{info, warn};

/// Composer placeholder in its resting state.
pub const PLACEHOLDER_DEFAULT: &str = "What's on your mind?";
/// Placeholder while a pasted image is uploading.
pub const PLACEHOLDER_UPLOADING: &str = "Uploading image...";
/// Placeholder after an upload failed.
pub const PLACEHOLDER_UPLOAD_FAILED: &str = "Upload failed. Please try again.";

/// How many ticks a transient status message stays visible.
const STATUS_TICKS: u64 = 20;

/// How the run loop should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Restart the client (refresh affordance / update activation).
    Restart,
}

/// Input mode for the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Main application state
pub struct App {
    pub theme: Theme,
    pub input_mode: InputMode,

    /// Latest view of the feed controller.
    pub feed: FeedSnapshot,
    /// Selected post index within the displayed page.
    pub selected: usize,

    // Composer
    pub input: String,
    pub input_cursor: usize,
    pub placeholder: &'static str,
    uploading: bool,

    /// Modal alert (push subscription outcome); any key dismisses it.
    pub alert: Option<String>,
    /// Transient status line message.
    pub status: Option<String>,
    status_since: u64,

    pub show_help: bool,

    pub updates: UpdateNotifier,

    jobs: Jobs,
    tick_count: u64,
}

impl App {
    pub fn new(controller: FeedController<ThoughtsClient>) -> Self {
        let jobs = Jobs::new(controller);
        let feed = jobs.snapshot();

        // Initial load, like opening the page.
        jobs.load_page(1);

        Self {
            theme: Theme::default(),
            input_mode: InputMode::default(),
            feed,
            selected: 0,
            input: String::new(),
            input_cursor: 0,
            placeholder: PLACEHOLDER_DEFAULT,
            uploading: false,
            alert: None,
            status: None,
            status_since: 0,
            show_help: false,
            updates: UpdateNotifier::for_current_exe(),
            jobs,
            tick_count: 0,
        }
    }

    /// Called on each tick: drain job outcomes, refresh the snapshot,
    /// expire transient status, and check for installed updates.
    pub fn on_tick(&mut self) {
        self.tick_count += 1;

        while let Some(outcome) = self.jobs.try_recv() {
            self.apply_outcome(outcome);
        }

        self.feed = self.jobs.snapshot();
        if !self.feed.posts.is_empty() {
            self.selected = self.selected.min(self.feed.posts.len() - 1);
        } else {
            self.selected = 0;
        }

        if self.status.is_some() && self.tick_count.saturating_sub(self.status_since) > STATUS_TICKS
        {
            self.status = None;
        }

        // Binary mtime checks are cheap, but once every couple of seconds
        // is plenty (8 ticks at the default 250ms rate).
        if self.tick_count % 8 == 0 {
            self.updates.poll();
        }
    }

    fn apply_outcome(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::FeedChanged => {}
            JobOutcome::Submitted(SubmitOutcome::Posted) => {
                self.input.clear();
                self.input_cursor = 0;
                self.placeholder = PLACEHOLDER_DEFAULT;
                self.selected = 0;
                self.set_status("thought posted");
            }
            JobOutcome::Submitted(SubmitOutcome::Ignored) => {}
            JobOutcome::Submitted(SubmitOutcome::Failed) => {
                // Inline error comes from the snapshot; the input stays
                // for retry.
            }
            JobOutcome::UploadFinished(Ok(url)) => {
                self.uploading = false;
                self.input = url;
                self.input_cursor = self.input.len();
                self.placeholder = PLACEHOLDER_DEFAULT;
                self.set_status("image uploaded");
            }
            JobOutcome::UploadFinished(Err(e)) => {
                warn!(error = %e, "image upload failed");
                self.uploading = false;
                self.placeholder = PLACEHOLDER_UPLOAD_FAILED;
            }
            JobOutcome::SubscribeFinished(Ok(())) => {
                self.alert = Some("Successfully subscribed to notifications!".to_string());
            }
            JobOutcome::SubscribeFinished(Err(message)) => {
                self.alert = Some(message);
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_since = self.tick_count;
    }

    /// Handle keyboard input. Returns how to exit, if at all.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Exit> {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Exit::Quit);
        }

        // The alert overlay swallows the next key press.
        if self.alert.is_some() {
            self.alert = None;
            return None;
        }

        // Help overlay consumes all other keys when shown
        if self.show_help {
            self.show_help = false;
            return None;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key),
            InputMode::Editing => self.handle_editing_mode_key(key),
        }
    }

    fn handle_normal_mode_key(&mut self, key: KeyEvent) -> Option<Exit> {
        match key.code {
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,

            // Compose
            KeyCode::Char('i') => self.input_mode = InputMode::Editing,

            // Feed navigation
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.feed.posts.is_empty() {
                    self.selected = (self.selected + 1).min(self.feed.posts.len() - 1);
                }
            }

            // Open the selected post's image or first link
            KeyCode::Enter => self.open_selected(),

            // Pagination: older pages sit to the right
            KeyCode::Right | KeyCode::Char('o') => {
                if self.feed.page.has_next {
                    self.jobs.load_older();
                }
            }
            KeyCode::Left | KeyCode::Char('n') => {
                if self.feed.page.has_prev {
                    self.jobs.load_newer();
                }
            }

            // Reload the current page
            KeyCode::Char('r') => self.jobs.refresh(),

            // Push notifications
            KeyCode::Char('s') => {
                self.set_status("subscribing to notifications...");
                self.jobs.subscribe();
            }

            // Refresh affordance / update activation
            KeyCode::Char('u') => {
                if let Some(action) = self.updates.request_refresh() {
                    match action {
                        RefreshAction::Activate => info!("activating newly installed version"),
                        RefreshAction::Reload => info!("restarting client"),
                    }
                    return Some(Exit::Restart);
                }
            }

            // Theme toggle
            KeyCode::Char('t') => self.theme = self.theme.next(),

            // Quit
            KeyCode::Char('q') => return Some(Exit::Quit),
            KeyCode::Esc => {
                if self.selected > 0 {
                    self.selected = 0;
                } else {
                    return Some(Exit::Quit);
                }
            }

            _ => {}
        }

        None
    }

    fn handle_editing_mode_key(&mut self, key: KeyEvent) -> Option<Exit> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input.len(),
            _ => {}
        }

        None
    }

    /// Submit the composer. Blank input is a no-op; the input is cleared
    /// only once the server accepts the post.
    fn submit(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }
        self.set_status("posting...");
        self.jobs.submit(self.input.clone());
    }

    /// Handle a bracketed paste into the composer.
    ///
    /// A pasted image file is intercepted and uploaded; its URL replaces
    /// the composer content when the upload finishes. Anything else is
    /// inserted as text.
    pub fn handle_paste(&mut self, pasted: String) {
        match classify(&pasted) {
            Paste::Image {
                filename,
                bytes,
                mime,
            } => {
                self.uploading = true;
                self.placeholder = PLACEHOLDER_UPLOADING;
                self.jobs.upload(filename, bytes, mime);
            }
            Paste::Text(text) => {
                self.input_mode = InputMode::Editing;
                let sanitized: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&sanitized);
            }
        }
    }

    fn open_selected(&mut self) {
        let Some(url) = self
            .feed
            .posts
            .get(self.selected)
            .and_then(|post| post.primary_url())
            .map(str::to_string)
        else {
            return;
        };

        match webbrowser::open(&url) {
            Ok(()) => self.set_status(format!("opened {url}")),
            Err(e) => {
                warn!(error = %e, url, "couldn't open browser");
                self.set_status("couldn't open browser");
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    // ----- composer cursor helpers (byte cursor, char-boundary safe) -----

    fn insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    fn insert_str(&mut self, s: &str) {
        self.input.insert_str(self.input_cursor, s);
        self.input_cursor += s.len();
    }

    fn backspace(&mut self) {
        if let Some(c) = self.input[..self.input_cursor].chars().next_back() {
            self.input_cursor -= c.len_utf8();
            self.input.remove(self.input_cursor);
        }
    }

    fn delete(&mut self) {
        if self.input_cursor < self.input.len() {
            self.input.remove(self.input_cursor);
        }
    }

    fn move_cursor_left(&mut self) {
        if let Some(c) = self.input[..self.input_cursor].chars().next_back() {
            self.input_cursor -= c.len_utf8();
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(c) = self.input[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_app() -> App {
        // Nothing listens on the discard port; spawned jobs fail into the
        // inline error state, which these tests don't assert on.
        let client =
            thoughts_client::ThoughtsClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        App::new(FeedController::new(client))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Exit> {
        app.handle_key(KeyEvent::from(code))
    }

    #[tokio::test]
    async fn test_editing_round_trip_with_multibyte() {
        let mut app = test_app();
        app.input_mode = InputMode::Editing;

        for c in "héllo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.input, "héllo");

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "hllo");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "llo");
    }

    #[tokio::test]
    async fn test_blank_submit_keeps_editing_silently() {
        let mut app = test_app();
        app.input_mode = InputMode::Editing;
        app.input = "   ".into();
        app.input_cursor = 3;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input, "   ", "blank input must not be cleared or sent");
        assert!(app.status.is_none());
    }

    #[tokio::test]
    async fn test_text_paste_enters_editing_and_inserts() {
        let mut app = test_app();
        app.handle_paste("hello\nworld".into());

        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.input, "hello world");
        assert_eq!(app.input_cursor, app.input.len());
    }

    #[tokio::test]
    async fn test_alert_swallows_next_key() {
        let mut app = test_app();
        app.alert = Some("Subscription failed".into());

        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert!(app.alert.is_none());
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Exit::Quit));
    }

    #[tokio::test]
    async fn test_upload_outcome_replaces_composer() {
        let mut app = test_app();
        app.input = "/tmp/shot.png".into();
        app.input_cursor = app.input.len();

        app.apply_outcome(JobOutcome::UploadFinished(Ok(
            "https://img.example/1.png".into()
        )));
        assert_eq!(app.input, "https://img.example/1.png");
        assert_eq!(app.placeholder, PLACEHOLDER_DEFAULT);

        app.apply_outcome(JobOutcome::UploadFinished(Err("500".into())));
        assert_eq!(app.placeholder, PLACEHOLDER_UPLOAD_FAILED);
    }

    #[tokio::test]
    async fn test_posted_outcome_clears_composer() {
        let mut app = test_app();
        app.input = "a fine thought".into();
        app.input_cursor = app.input.len();

        app.apply_outcome(JobOutcome::Submitted(SubmitOutcome::Posted));
        assert!(app.input.is_empty());
        assert_eq!(app.input_cursor, 0);

        // A failed submission keeps the text for retry.
        app.input = "try again".into();
        app.apply_outcome(JobOutcome::Submitted(SubmitOutcome::Failed));
        assert_eq!(app.input, "try again");
    }
}
