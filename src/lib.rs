//! Tilebingo library - bingo card logic for tile-pool services
//!
//! Client-side logic for a bingo card game: normalizing card input into a
//! uniform grid, tracking marked cells, detecting winning lines, talking to
//! an external tile-pool HTTP API, and keeping a capped local list of saved
//! cards.
//!
//! # Example
//!
//! ```
//! use tilebingo::{Board, CardInput, Tile};
//!
//! let words: Vec<Tile> = (0..24).map(|i| Tile::text(format!("word {i}"))).collect();
//! let tiles = CardInput::Flat(words).normalize(5)?;
//! let mut board = Board::new(tiles, 5)?;
//!
//! board.toggle(0);
//! assert!(!board.has_win());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod game;
mod session;
mod store;

// Crate-level exports - Game types and core routines
pub use game::{
    BingoCard, Board, BoardError, CardInput, Cell, FREE_CONTENT, NewTilePool, NormalizeError,
    Tile, TileKind, TilePool, TilePoolSummary, check_win, normalize_value,
};

// Crate-level exports - HTTP client
pub use client::{ClientError, TilePoolClient};

// Crate-level exports - Saved-card store
pub use store::{CardStore, MAX_SAVED_CARDS, SavedCard, StoreError};

// Crate-level exports - Page session
pub use session::PageSession;
