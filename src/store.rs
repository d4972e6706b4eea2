//! Persistent saved-card store.
//!
//! The local-storage analog: one JSON file holding an ordered list of
//! [`SavedCard`]s, capped at [`MAX_SAVED_CARDS`] entries with FIFO eviction.
//! Each operation reads and rewrites the file; there is no schema
//! versioning or migration.

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Maximum number of saved cards kept on disk.
pub const MAX_SAVED_CARDS: usize = 50;

/// Errors from saved-card store operations.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[display("store I/O error: {_0}")]
    Io(std::io::Error),
    /// The backing file holds malformed JSON.
    #[display("store JSON error: {_0}")]
    Json(serde_json::Error),
    /// No saved card at the requested index.
    #[display("no saved card at index {index}")]
    #[from(ignore)]
    NotFound {
        /// Requested index.
        index: usize,
    },
}

/// A named snapshot of a rendered card's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct SavedCard {
    /// Name the card was saved under.
    name: String,
    /// Cell contents in row-major order.
    data: Vec<String>,
}

/// Saved-card store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct CardStore {
    path: PathBuf,
}

impl CardStore {
    /// Creates a store over the given file path. The file is created on the
    /// first save.
    #[instrument]
    pub fn new(path: impl Into<PathBuf> + std::fmt::Debug) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Opening card store");
        Self { path }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a card, evicting the oldest entry first if the store already
    /// holds [`MAX_SAVED_CARDS`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or written.
    #[instrument(skip(self, card), fields(name = %card.name()))]
    pub fn save(&self, card: SavedCard) -> Result<(), StoreError> {
        let mut cards = self.read_all()?;

        // The file may hold more than the cap if something else wrote it.
        while cards.len() >= MAX_SAVED_CARDS {
            let evicted = cards.remove(0);
            warn!(evicted = %evicted.name(), "Store full, evicting oldest card");
        }
        cards.push(card);

        self.write_all(&cards)?;
        info!(count = cards.len(), "Card saved");
        Ok(())
    }

    /// Lists saved cards in insertion order. A missing or empty file reads
    /// as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<SavedCard>, StoreError> {
        let cards = self.read_all()?;
        debug!(count = cards.len(), "Listed saved cards");
        Ok(cards)
    }

    /// Loads one saved card by position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the index is out of range.
    #[instrument(skip(self))]
    pub fn load(&self, index: usize) -> Result<SavedCard, StoreError> {
        let mut cards = self.read_all()?;
        if index >= cards.len() {
            return Err(StoreError::NotFound { index });
        }
        Ok(cards.swap_remove(index))
    }

    fn read_all(&self) -> Result<Vec<SavedCard>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, cards: &[SavedCard]) -> Result<(), StoreError> {
        let text = serde_json::to_string(cards)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
