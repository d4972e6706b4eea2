//! Core domain types for bingo cards and tile pools.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Content of the free cell, as the tile-pool service spells it.
pub const FREE_CONTENT: &str = "FREE";

/// Kind of content a tile carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Plain text, displayed directly.
    #[default]
    Text,
    /// An image reference; `content` is the resource locator.
    Image,
}

/// A single tile drawn from a tile pool. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Tile {
    /// Tile kind (`text` or `image` on the wire).
    #[serde(rename = "type", default)]
    kind: TileKind,
    /// Displayable content, or the resource locator for images.
    content: String,
    /// Tags attached to the tile by the pool owner.
    #[serde(default)]
    tags: BTreeSet<String>,
}

impl Tile {
    /// Creates an untagged text tile.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(TileKind::Text, content.into(), BTreeSet::new())
    }

    /// Creates the synthetic free tile.
    pub fn free() -> Self {
        Self::text(FREE_CONTENT)
    }

    /// Whether this tile marks the free cell.
    pub fn is_free(&self) -> bool {
        self.content == FREE_CONTENT
    }
}

/// A sized bingo card as served by `GET /bingocard/{id}`.
///
/// `tiles` may hold more than `size * size` entries; only the first
/// `size * size` are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct BingoCard {
    /// Card identifier assigned by the service.
    id: String,
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
    /// Side length of the card.
    size: usize,
}

/// Summary entry from `GET /tilepools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TilePoolSummary {
    /// Pool identifier.
    id: String,
    /// Human-readable pool name.
    name: String,
}

/// A full tile pool from `GET /tilepools/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TilePool {
    /// Pool identifier.
    id: String,
    /// Human-readable pool name.
    name: String,
    /// Candidate tiles cards are drawn from.
    tiles: Vec<Tile>,
    /// Creation timestamp as reported by the service.
    created_at: String,
    /// Pool owner.
    owner: String,
}

/// Request body for `POST /tilepools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct NewTilePool {
    /// Name for the new pool.
    name: String,
    /// Candidate tiles.
    tiles: Vec<Tile>,
    /// Tile to place in the free cell of drawn cards.
    free_tile: Tile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_kind_defaults_to_text() {
        let tile: Tile = serde_json::from_str(r#"{"content": "sunset"}"#).expect("Parse failed");
        assert_eq!(*tile.kind(), TileKind::Text);
        assert!(tile.tags().is_empty());
    }

    #[test]
    fn test_image_tile_round_trips_wire_format() {
        let json = r#"{"type": "image", "content": "https://example.com/a.png", "tags": ["art"]}"#;
        let tile: Tile = serde_json::from_str(json).expect("Parse failed");
        assert_eq!(*tile.kind(), TileKind::Image);

        let value = serde_json::to_value(&tile).expect("Serialize failed");
        assert_eq!(value["type"], "image");
    }

    #[test]
    fn test_free_tile_is_free() {
        assert!(Tile::free().is_free());
        assert!(!Tile::text("free parking").is_free());
    }
}
