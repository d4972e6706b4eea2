//! Background card fetches.
//!
//! Fetches run as spawned tasks so the UI thread never blocks on the
//! network. Each task carries the generation token it was issued with; the
//! application drops results whose token is no longer current, so a slow
//! response cannot overwrite a newer board.

use crate::client::TilePoolClient;
use crate::game::{CardInput, Tile};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// Messages sent from fetch tasks to the UI.
#[derive(Debug, Clone)]
pub enum CardEvent {
    /// A normalized card is ready to render.
    CardReady {
        /// Fetch generation this result belongs to.
        generation: u64,
        /// Name of the pool the card was drawn from.
        pool_name: String,
        /// Normalized tiles, exactly `size * size` of them.
        tiles: Vec<Tile>,
    },
    /// The fetch failed; the previous board stays up.
    FetchFailed {
        /// Fetch generation this failure belongs to.
        generation: u64,
        /// Message for the status line.
        message: String,
    },
}

/// Spawns a task that fetches the pool name and then a card, in that order,
/// and reports the outcome on `tx`.
#[instrument(skip(client, tx))]
pub fn spawn_card_fetch(
    client: TilePoolClient,
    pool_id: String,
    size: usize,
    seed: u64,
    generation: u64,
    tx: mpsc::UnboundedSender<CardEvent>,
) {
    tokio::spawn(async move {
        let event = fetch_card(&client, &pool_id, size, seed, generation).await;
        // Receiver dropped means the UI is shutting down.
        let _ = tx.send(event);
    });
}

async fn fetch_card(
    client: &TilePoolClient,
    pool_id: &str,
    size: usize,
    seed: u64,
    generation: u64,
) -> CardEvent {
    // Pool name first, then the card, matching the page's sequencing.
    let pool = match client.get_pool(pool_id).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, pool_id, "Failed to fetch tile pool");
            return CardEvent::FetchFailed {
                generation,
                message: format!("Failed to fetch tile pool: {e}"),
            };
        }
    };

    let card = match client.get_card(pool_id, size, seed).await {
        Ok(card) => card,
        Err(e) => {
            warn!(error = %e, pool_id, "Failed to fetch bingo card");
            return CardEvent::FetchFailed {
                generation,
                message: format!("Failed to fetch bingo card: {e}"),
            };
        }
    };

    match CardInput::Tiles(card.tiles().clone()).normalize(size) {
        Ok(tiles) => {
            info!(generation, pool = %pool.name(), "Card ready");
            CardEvent::CardReady {
                generation,
                pool_name: pool.name().clone(),
                tiles,
            }
        }
        Err(e) => {
            warn!(error = %e, card_id = %card.id(), "Card failed normalization");
            CardEvent::FetchFailed {
                generation,
                message: format!("Card unusable: {e}"),
            }
        }
    }
}
