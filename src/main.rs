//! Tilebingo - terminal bingo card client.

#![warn(missing_docs)]

mod cli;
mod client;
mod game;
mod session;
mod store;
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, DEFAULT_SERVER_URL};
use client::TilePoolClient;
use game::{NewTilePool, Tile};
use store::CardStore;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Minimum non-empty lines required to submit a new tile pool: a 5x5 card
/// needs 24 tiles plus the free cell.
const MIN_POOL_TILES: usize = 24;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            pool,
            size,
            seed,
            words_file,
            cards_file,
        } => {
            if size == 0 {
                bail!("Card size must be at least 1.");
            }

            let words = match words_file {
                Some(path) => Some(read_word_list(&path, size)?),
                None => None,
            };

            let client = TilePoolClient::new(resolve_server_url(server_url));
            let store = CardStore::new(cards_file);
            tui::run_tui(client, store, pool, size, seed, words).await
        }
        Command::Pools { server_url } => {
            init_tracing();
            list_pools(TilePoolClient::new(resolve_server_url(server_url))).await
        }
        Command::CreatePool {
            name,
            tiles_file,
            server_url,
        } => {
            init_tracing();
            create_pool(
                TilePoolClient::new(resolve_server_url(server_url)),
                name,
                tiles_file,
            )
            .await
        }
        Command::Cards { cards_file } => {
            init_tracing();
            list_cards(CardStore::new(cards_file))
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn resolve_server_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("TILEBINGO_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

async fn list_pools(client: TilePoolClient) -> Result<()> {
    let pools = client
        .list_pools()
        .await
        .context("Failed to list tile pools")?;

    if pools.is_empty() {
        println!("No tile pools on {}.", client.base_url());
        return Ok(());
    }

    for pool in pools {
        println!("{}  {}", pool.id(), pool.name());
    }
    Ok(())
}

/// Reads trimmed, non-empty lines from a file.
fn read_content_lines(path: &std::path::Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads a local word list for a card of the given size.
///
/// Too few words blocks the card entirely, matching the tile-pool
/// submission rule; the free cell fills the remaining slot.
fn read_word_list(path: &std::path::Path, size: usize) -> Result<Vec<String>> {
    let words = read_content_lines(path)?;

    let need = size * size - 1;
    if words.len() < need {
        bail!(
            "Please enter at least {need} words ({} found in {}).",
            words.len(),
            path.display()
        );
    }

    Ok(words)
}

#[instrument(skip(client))]
async fn create_pool(
    client: TilePoolClient,
    name: String,
    tiles_file: std::path::PathBuf,
) -> Result<()> {
    let tiles: Vec<Tile> = read_content_lines(&tiles_file)?
        .into_iter()
        .map(Tile::text)
        .collect();

    // Validation failure blocks submission; nothing is posted.
    if tiles.len() < MIN_POOL_TILES {
        bail!(
            "Please enter at least {MIN_POOL_TILES} tiles ({} found in {}).",
            tiles.len(),
            tiles_file.display()
        );
    }

    let new_pool = NewTilePool::new(name, tiles, Tile::free());
    let created = client
        .create_pool(&new_pool)
        .await
        .context("Failed to create tile pool")?;

    info!(pool_id = %created.id(), "Tile pool created");
    println!("Created tile pool \"{}\" with id {}.", created.name(), created.id());
    Ok(())
}

fn list_cards(store: CardStore) -> Result<()> {
    let cards = store.list().context("Failed to read saved cards")?;

    if cards.is_empty() {
        println!("No saved bingo cards.");
        return Ok(());
    }

    for (index, card) in cards.iter().enumerate() {
        println!("{index:2}  {} ({} cells)", card.name(), card.data().len());
    }
    Ok(())
}
