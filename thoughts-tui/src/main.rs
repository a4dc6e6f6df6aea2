//! Thoughts terminal client
//!
//! A terminal interface for a thoughts micro-blog server: read the feed,
//! page through history, post, paste images, and wire up notifications.

mod app;
mod events;
mod jobs;
mod paste;
mod theme;
mod ui;
mod update;

use anyhow::{Context, Result};
use app::{App, Exit};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events::EventHandler;
use ratatui::prelude::*;
use std::env;
use std::io::stdout;
use thoughts_client::{FeedController, ThoughtsClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

const DEFAULT_SERVER: &str = "http://localhost:8000/";

#[derive(Parser)]
#[command(name = "thoughts-tui")]
#[command(about = "Terminal client for the thoughts micro-blog")]
#[command(version)]
struct Cli {
    /// Server base URL (falls back to $THOUGHTS_SERVER, then localhost)
    #[arg(short, long)]
    server: Option<Url>,

    /// UI tick rate in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_rate: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let server = match cli.server {
        Some(url) => url,
        None => {
            let raw = env::var("THOUGHTS_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
            Url::parse(&raw).context("invalid THOUGHTS_SERVER URL")?
        }
    };

    let controller = FeedController::new(ThoughtsClient::new(server));
    let mut app = App::new(controller);
    let event_handler = EventHandler::new(cli.tick_rate);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app, event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(Exit::Quit) => Ok(()),
        Ok(Exit::Restart) => restart(),
        Err(e) => {
            eprintln!("Application error: {}", e);
            Ok(())
        }
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_handler: EventHandler,
) -> Result<Exit> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle events
        match event_handler.next().await? {
            events::Event::Tick => app.on_tick(),
            events::Event::Key(key) => {
                if let Some(exit) = app.handle_key(key) {
                    return Ok(exit);
                }
            }
            events::Event::Paste(text) => app.handle_paste(text),
            events::Event::Resize(_, _) => {}
        }
    }
}

/// Replace this process with a fresh copy of the client binary.
#[cfg(unix)]
fn restart() -> Result<()> {
    use std::os::unix::process::CommandExt;

    let exe = env::current_exe()?;
    let args: Vec<String> = env::args().skip(1).collect();

    // exec only returns on failure
    let err = std::process::Command::new(&exe).args(&args).exec();
    Err(err.into())
}

/// Launch a fresh copy of the client binary and let this one exit.
#[cfg(not(unix))]
fn restart() -> Result<()> {
    let exe = env::current_exe()?;
    let args: Vec<String> = env::args().skip(1).collect();

    std::process::Command::new(&exe).args(&args).spawn()?;
    Ok(())
}
