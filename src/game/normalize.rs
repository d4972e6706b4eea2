//! Card input normalization.
//!
//! The tile-pool service and the local store hand back cards in several
//! shapes: a flat list of raw content values, or an object wrapping a
//! `tiles` or `grid` array. [`CardInput`] classifies the shape once at the
//! boundary; [`CardInput::normalize`] then produces a uniform row-major
//! tile sequence of exactly `size * size` entries.

use super::tiles::Tile;
use derive_more::{Display, Error};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Errors produced while normalizing card input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NormalizeError {
    /// The input is not one of the accepted shapes.
    #[display("unsupported card input shape: {found}")]
    UnsupportedShape {
        /// Description of what was found instead.
        found: &'static str,
    },
    /// The input holds too few entries for the requested size.
    #[display("not enough tiles: need {need}, got {got}")]
    NotEnoughTiles {
        /// Entries required for the requested size.
        need: usize,
        /// Entries actually present.
        got: usize,
    },
}

/// Card input with its shape resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardInput {
    /// A flat list of raw content values; the free cell is not yet placed.
    Flat(Vec<Tile>),
    /// A wrapped `tiles` array that already includes any free placement.
    Tiles(Vec<Tile>),
    /// A wrapped `grid` array, handled identically to `Tiles`.
    Grid(Vec<Tile>),
}

impl CardInput {
    /// Classifies a raw JSON value into one of the accepted shapes.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnsupportedShape`] for anything that is not
    /// an array, an object with an array `tiles` field, or an object with an
    /// array `grid` field, and for array entries that are neither strings
    /// nor tile-like objects.
    #[instrument(skip(value))]
    pub fn classify(value: &Value) -> Result<Self, NormalizeError> {
        match value {
            Value::Array(items) => {
                debug!(count = items.len(), "Classified flat card input");
                Ok(Self::Flat(convert_entries(items)?))
            }
            Value::Object(map) => {
                if let Some(Value::Array(items)) = map.get("tiles") {
                    debug!(count = items.len(), "Classified wrapped tiles input");
                    Ok(Self::Tiles(convert_entries(items)?))
                } else if let Some(Value::Array(items)) = map.get("grid") {
                    debug!(count = items.len(), "Classified wrapped grid input");
                    Ok(Self::Grid(convert_entries(items)?))
                } else {
                    warn!("Object input has no tiles or grid array");
                    Err(NormalizeError::UnsupportedShape {
                        found: "object without a tiles or grid array",
                    })
                }
            }
            Value::String(_) => Err(NormalizeError::UnsupportedShape {
                found: "bare string",
            }),
            Value::Number(_) => Err(NormalizeError::UnsupportedShape { found: "number" }),
            Value::Bool(_) => Err(NormalizeError::UnsupportedShape { found: "boolean" }),
            Value::Null => Err(NormalizeError::UnsupportedShape { found: "null" }),
        }
    }

    /// Normalizes the input into exactly `size * size` tiles in row-major
    /// order.
    ///
    /// Flat input takes the first `size * size - 1` entries and inserts the
    /// free tile at the center index. Wrapped input is taken verbatim,
    /// truncated to the first `size * size` entries.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::NotEnoughTiles`] if the input is too short
    /// for the requested size.
    #[instrument(skip(self))]
    pub fn normalize(self, size: usize) -> Result<Vec<Tile>, NormalizeError> {
        let cells = size * size;
        match self {
            Self::Flat(mut tiles) => {
                if cells == 0 {
                    return Ok(Vec::new());
                }
                let need = cells - 1;
                if tiles.len() < need {
                    warn!(need, got = tiles.len(), "Flat input too short");
                    return Err(NormalizeError::NotEnoughTiles {
                        need,
                        got: tiles.len(),
                    });
                }
                tiles.truncate(need);
                tiles.insert(cells / 2, Tile::free());
                Ok(tiles)
            }
            Self::Tiles(mut tiles) | Self::Grid(mut tiles) => {
                if tiles.len() < cells {
                    warn!(need = cells, got = tiles.len(), "Wrapped input too short");
                    return Err(NormalizeError::NotEnoughTiles {
                        need: cells,
                        got: tiles.len(),
                    });
                }
                tiles.truncate(cells);
                Ok(tiles)
            }
        }
    }
}

/// Normalizes a raw JSON value in one step.
///
/// # Errors
///
/// Returns [`NormalizeError`] if the shape is unsupported or too short.
pub fn normalize_value(value: &Value, size: usize) -> Result<Vec<Tile>, NormalizeError> {
    CardInput::classify(value)?.normalize(size)
}

fn convert_entries(items: &[Value]) -> Result<Vec<Tile>, NormalizeError> {
    items.iter().map(convert_entry).collect()
}

fn convert_entry(value: &Value) -> Result<Tile, NormalizeError> {
    match value {
        Value::String(content) => Ok(Tile::text(content.clone())),
        Value::Object(_) => serde_json::from_value(value.clone()).map_err(|_| {
            NormalizeError::UnsupportedShape {
                found: "object entry without string content",
            }
        }),
        _ => Err(NormalizeError::UnsupportedShape {
            found: "entry that is neither a string nor a tile object",
        }),
    }
}
