//! Bingo domain: tiles, card normalization, board state, and win rules.

mod board;
mod normalize;
mod rules;
mod tiles;

pub use board::{Board, BoardError, Cell};
pub use normalize::{CardInput, NormalizeError, normalize_value};
pub use rules::check_win;
pub use tiles::{BingoCard, FREE_CONTENT, NewTilePool, Tile, TileKind, TilePool, TilePoolSummary};
