//! Portfolio TUI - terminal dashboard for a spreadsheet-backed project portfolio.
//!
//! Fetches the published sheet once, then lets the user filter projects by
//! search text, skill and year, and open a project by id.

mod api;
mod app;
mod config;
mod filter;
mod logging;
mod models;
mod navigation;
mod parser;
mod theme;
mod timeline;
mod ui;
mod views;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use api::{ApiMessage, SheetClient};
use app::App;
use config::{Cli, Config};

/// Redraw interval while idle (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();

    let config = Config::from_cli(Cli::parse())?;
    let _log_guard = logging::init(&config.log_file)?;
    tracing::info!(source = %config.source.describe(), location = %config.location, "starting");

    if config.dump {
        return dump(&config).await;
    }

    run_tui(config).await
}

/// Print the parsed dataset as JSON
async fn dump(config: &Config) -> Result<()> {
    let client = SheetClient::new(config.source.clone())?;
    let text = client.fetch_text().await.context("Failed to fetch the sheet")?;
    let records = parser::parse(&text);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Run the TUI application
async fn run_tui(config: Config) -> Result<()> {
    let client = SheetClient::new(config.source.clone())?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config.location, client.source().describe());

    let (api_tx, mut api_rx) = mpsc::channel::<ApiMessage>(4);
    let loader = tokio::spawn(api::run_loader(client, api_tx));

    let result = run_event_loop(&mut terminal, &mut app, &mut api_rx);

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    loader.abort();

    tracing::info!(location = %app.navigator.location(), "exiting");
    println!("{}", app.navigator.location());

    result
}

/// Run the main event loop
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api_rx: &mut mpsc::Receiver<ApiMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        while let Ok(msg) = api_rx.try_recv() {
            app.handle_api_message(msg);
        }

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
