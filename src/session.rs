//! Page-session context.
//!
//! One owned object for the state the page holds between actions: the name
//! of the tile pool behind the current card, the current board, and the
//! saved-card store. Owned by the TUI application and only mutated from the
//! main task.

use crate::game::Board;
use crate::store::{CardStore, SavedCard, StoreError};
use tracing::{debug, info, instrument};

/// Mutable page state shared across user actions.
#[derive(Debug)]
pub struct PageSession {
    pool_name: Option<String>,
    board: Option<Board>,
    store: CardStore,
}

impl PageSession {
    /// Creates a session with no board rendered yet.
    pub fn new(store: CardStore) -> Self {
        Self {
            pool_name: None,
            board: None,
            store,
        }
    }

    /// Name of the tile pool the current card came from, if any.
    pub fn pool_name(&self) -> Option<&str> {
        self.pool_name.as_deref()
    }

    /// The currently rendered board, if any.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Mutable access to the currently rendered board.
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// The saved-card store.
    pub fn store(&self) -> &CardStore {
        &self.store
    }

    /// Replaces the rendered board and its originating pool name.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn set_board(&mut self, board: Board, pool_name: Option<String>) {
        info!("Replacing rendered board");
        self.board = Some(board);
        self.pool_name = pool_name;
    }

    /// Saves the current board's contents under the given name.
    ///
    /// Returns the saved card, or `None` if no board is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    #[instrument(skip(self))]
    pub fn save_current(&self, name: &str) -> Result<Option<SavedCard>, StoreError> {
        let Some(board) = &self.board else {
            debug!("No board to save");
            return Ok(None);
        };

        let card = SavedCard::new(name.to_string(), board.contents());
        self.store.save(card.clone())?;
        Ok(Some(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    fn sample_board() -> Board {
        let mut tiles: Vec<Tile> = (0..24).map(|i| Tile::text(format!("t{i}"))).collect();
        tiles.insert(12, Tile::free());
        Board::new(tiles, 5).expect("Board failed")
    }

    #[test]
    fn test_save_without_board_is_noop() {
        let dir = tempfile::tempdir().expect("Tempdir failed");
        let session = PageSession::new(CardStore::new(dir.path().join("cards.json")));
        let saved = session.save_current("empty").expect("Save failed");
        assert!(saved.is_none());
    }

    #[test]
    fn test_save_current_snapshots_contents() {
        let dir = tempfile::tempdir().expect("Tempdir failed");
        let store = CardStore::new(dir.path().join("cards.json"));
        let mut session = PageSession::new(store);
        session.set_board(sample_board(), Some("nouns".to_string()));

        let saved = session
            .save_current("my card")
            .expect("Save failed")
            .expect("No card saved");
        assert_eq!(saved.name(), "my card");
        assert_eq!(saved.data().len(), 25);
        assert_eq!(saved.data()[12], "FREE");

        let listed = session.store().list().expect("List failed");
        assert_eq!(listed.len(), 1);
    }
}
