//! Runtime board state.
//!
//! A [`Board`] is the rendered form of a normalized tile sequence: exactly
//! `size * size` cells, each carrying its tile and a marked flag. The free
//! cell starts marked and stays marked; marking is otherwise driven by
//! [`Board::toggle`], with win detection as a separate read-only pass.

use super::rules::check_win;
use super::tiles::{Tile, TileKind};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Errors constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The tile sequence does not match the requested size.
    #[display("board needs exactly {need} tiles, got {got}")]
    WrongCellCount {
        /// `size * size`.
        need: usize,
        /// Tiles supplied.
        got: usize,
    },
}

/// One cell of a rendered board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    tile: Tile,
    marked: bool,
    free: bool,
}

impl Cell {
    /// The tile rendered in this cell.
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Whether the cell is currently marked.
    pub fn marked(&self) -> bool {
        self.marked
    }

    /// Whether this is the free cell (pre-marked, not togglable).
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Displayable label: tile content, with an image marker for image tiles.
    pub fn label(&self) -> String {
        match self.tile.kind() {
            TileKind::Text => self.tile.content().clone(),
            TileKind::Image => format!("[img] {}", self.tile.content()),
        }
    }
}

/// A square bingo board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from a normalized tile sequence.
    ///
    /// Tiles whose content is the free marker start marked and cannot be
    /// toggled, regardless of which input shape produced them.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongCellCount`] unless exactly `size * size`
    /// tiles are supplied.
    #[instrument(skip(tiles), fields(count = tiles.len()))]
    pub fn new(tiles: Vec<Tile>, size: usize) -> Result<Self, BoardError> {
        let need = size * size;
        if tiles.len() != need {
            return Err(BoardError::WrongCellCount {
                need,
                got: tiles.len(),
            });
        }

        let cells = tiles
            .into_iter()
            .map(|tile| {
                let free = tile.is_free();
                Cell {
                    tile,
                    marked: free,
                    free,
                }
            })
            .collect();

        Ok(Self { size, cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at the given row-major index.
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Toggles the marked state of the cell at `index`.
    ///
    /// Returns `true` if the cell changed. The free cell and out-of-range
    /// indices are no-ops.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if !cell.free => {
                cell.marked = !cell.marked;
                debug!(index, marked = cell.marked, "Toggled cell");
                true
            }
            Some(_) => {
                debug!(index, "Ignoring toggle on free cell");
                false
            }
            None => {
                debug!(index, "Ignoring toggle out of range");
                false
            }
        }
    }

    /// The marked states as a square matrix, row-major.
    pub fn marks(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.cells[row * self.size + col].marked)
                    .collect()
            })
            .collect()
    }

    /// Whether the current marks complete a row, column, or diagonal.
    pub fn has_win(&self) -> bool {
        check_win(&self.marks())
    }

    /// Raw cell contents in row-major order, for saving.
    pub fn contents(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.tile.content().clone())
            .collect()
    }
}
