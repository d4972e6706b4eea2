//! Terminal UI standing in for the browser page.

mod app;
mod fetch;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::client::TilePoolClient;
use crate::session::PageSession;
use crate::store::CardStore;
use app::App;
use fetch::CardEvent;

/// Runs the TUI client.
///
/// When `words` is given the first card is built locally from it, with no
/// service round trip. Otherwise, when `pool` is `None`, the first pool
/// from `GET /tilepools` is used, as the original page did on load.
pub async fn run_tui(
    client: TilePoolClient,
    store: CardStore,
    pool: Option<String>,
    size: usize,
    seed: Option<u64>,
    words: Option<Vec<String>>,
) -> Result<()> {
    // Log to a file so tracing output does not fight the terminal.
    let log_file = std::fs::File::create("tilebingo_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %client.base_url(), "Starting tilebingo TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = App::new(PageSession::new(store), client.clone(), size, seed, event_tx);

    if let Some(words) = words {
        app.use_words(words);
    } else {
        // Resolve the pool before entering the loop; a failure is a
        // status-line message, not a crash, and saved cards stay reachable.
        match resolve_pool(&client, pool).await {
            Ok(pool_id) => app.use_pool(pool_id),
            Err(e) => {
                warn!(error = %e, "Could not resolve a tile pool");
                app.set_status(format!("{e} Press 'v' for saved cards, 'q' to quit."));
            }
        }
    }

    let res = run_loop(&mut terminal, app, event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "TUI loop error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

async fn resolve_pool(client: &TilePoolClient, pool: Option<String>) -> Result<String> {
    if let Some(pool) = pool {
        return Ok(pool);
    }

    let pools = client
        .list_pools()
        .await
        .context("Failed to list tile pools.")?;
    let first = pools
        .first()
        .context("The service has no tile pools.")?;
    info!(pool_id = %first.id(), name = %first.name(), "Defaulting to first tile pool");
    Ok(first.id().clone())
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut event_rx: mpsc::UnboundedReceiver<CardEvent>,
) -> Result<()> {
    use tokio::time::Duration;

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Drain fetch results without blocking.
        while let Ok(card_event) = event_rx.try_recv() {
            app.handle_event(card_event);
        }

        // Keyboard input, non-blocking poll.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code);
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }
    }
}
