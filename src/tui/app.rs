//! Application state and logic.

use crate::client::TilePoolClient;
use crate::game::{Board, CardInput, Tile};
use crate::session::PageSession;
use crate::store::SavedCard;
use crossterm::event::KeyCode;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::fetch::{CardEvent, spawn_card_fetch};

/// Saved-cards overlay state.
#[derive(Debug)]
pub struct SavedOverlay {
    /// Cards listed, insertion order.
    pub cards: Vec<SavedCard>,
    /// Selected entry.
    pub cursor: usize,
}

/// Main application state.
pub struct App {
    session: PageSession,
    client: TilePoolClient,
    pool_id: Option<String>,
    size: usize,
    initial_seed: Option<u64>,
    cursor: usize,
    status: String,
    generation: u64,
    overlay: Option<SavedOverlay>,
    event_tx: mpsc::UnboundedSender<CardEvent>,
    should_quit: bool,
}

impl App {
    /// Creates the application around a session and fetch channel.
    pub fn new(
        session: PageSession,
        client: TilePoolClient,
        size: usize,
        initial_seed: Option<u64>,
        event_tx: mpsc::UnboundedSender<CardEvent>,
    ) -> Self {
        Self {
            session,
            client,
            pool_id: None,
            size,
            initial_seed,
            cursor: 0,
            status: "Fetching tile pools...".to_string(),
            generation: 0,
            overlay: None,
            event_tx,
            should_quit: false,
        }
    }

    /// The page session.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Cell index under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The saved-cards overlay, if open.
    pub fn overlay(&self) -> Option<&SavedOverlay> {
        self.overlay.as_ref()
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Sets the pool to draw cards from and requests the first card.
    pub fn use_pool(&mut self, pool_id: String) {
        info!(pool_id = %pool_id, "Using tile pool");
        self.pool_id = Some(pool_id);
        self.request_card();
    }

    /// Renders a card built locally from a word list, through the flat
    /// input path with the free tile inserted at the center.
    ///
    /// The card has no originating pool, so saves default to
    /// "Untitled Card".
    pub fn use_words(&mut self, words: Vec<String>) {
        info!(count = words.len(), "Building card from local word list");
        let tiles: Vec<Tile> = words.into_iter().map(Tile::text).collect();
        match CardInput::Flat(tiles).normalize(self.size) {
            Ok(tiles) => self.render_tiles(tiles, None),
            Err(e) => {
                warn!(error = %e, "Word list failed normalization");
                self.status = format!("Word list unusable: {e}");
            }
        }
    }

    /// Requests a fresh card from the current pool.
    ///
    /// Bumps the fetch generation so any in-flight response is discarded
    /// when it lands.
    pub fn request_card(&mut self) {
        let Some(pool_id) = self.pool_id.clone() else {
            self.status = "No tile pool selected.".to_string();
            return;
        };

        let seed = self
            .initial_seed
            .take()
            .unwrap_or_else(|| rand::rng().random_range(0..10_000));

        self.generation += 1;
        self.status = "Fetching bingo card...".to_string();
        debug!(generation = self.generation, seed, "Requesting card");

        spawn_card_fetch(
            self.client.clone(),
            pool_id,
            self.size,
            seed,
            self.generation,
            self.event_tx.clone(),
        );
    }

    /// Handles a fetch event.
    ///
    /// Events from superseded fetches are dropped.
    pub fn handle_event(&mut self, event: CardEvent) {
        debug!(?event, "Handling card event");

        match event {
            CardEvent::CardReady {
                generation,
                pool_name,
                tiles,
            } => {
                if generation != self.generation {
                    info!(generation, current = self.generation, "Dropping stale card");
                    return;
                }
                self.render_tiles(tiles, Some(pool_name));
            }
            CardEvent::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    info!(generation, current = self.generation, "Dropping stale failure");
                    return;
                }
                // Previous board stays visible.
                warn!(message = %message, "Fetch failed");
                self.status = format!("{message} Press 'n' to retry.");
            }
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.overlay.is_some() {
            self.handle_overlay_key(code);
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => self.request_card(),
            KeyCode::Char('s') => self.save_card(),
            KeyCode::Char('v') => self.open_saved(),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor(),
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, code: KeyCode) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => {
                self.overlay = None;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                overlay.cursor = overlay.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if overlay.cursor + 1 < overlay.cards.len() {
                    overlay.cursor += 1;
                }
            }
            KeyCode::Enter => self.load_selected(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        if self.size == 0 || self.session.board().is_none() {
            return;
        }
        let size = self.size as isize;
        let row = (self.cursor / self.size) as isize;
        let col = (self.cursor % self.size) as isize;
        let row = (row + dy).clamp(0, size - 1);
        let col = (col + dx).clamp(0, size - 1);
        self.cursor = (row * size + col) as usize;
    }

    fn toggle_cursor(&mut self) {
        let cursor = self.cursor;
        let Some(board) = self.session.board_mut() else {
            return;
        };

        if !board.toggle(cursor) {
            debug!(cursor, "Toggle had no effect");
            return;
        }

        if board.has_win() {
            self.status = "BINGO! You have a winning card!".to_string();
        } else {
            self.status = default_status(self.session.pool_name());
        }
    }

    fn save_card(&mut self) {
        let name = self
            .session
            .pool_name()
            .unwrap_or("Untitled Card")
            .to_string();

        match self.session.save_current(&name) {
            Ok(Some(_)) => {
                self.status = format!("Bingo card \"{name}\" saved.");
            }
            Ok(None) => {
                self.status = "No card to save yet.".to_string();
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.status = format!("Failed to save card: {e}");
            }
        }
    }

    fn open_saved(&mut self) {
        match self.session.store().list() {
            Ok(cards) if cards.is_empty() => {
                self.status = "No saved bingo cards.".to_string();
            }
            Ok(cards) => {
                self.overlay = Some(SavedOverlay { cards, cursor: 0 });
            }
            Err(e) => {
                warn!(error = %e, "Listing saved cards failed");
                self.status = format!("Failed to read saved cards: {e}");
            }
        }
    }

    fn load_selected(&mut self) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        let Some(card) = overlay.cards.into_iter().nth(overlay.cursor) else {
            return;
        };

        info!(name = %card.name(), "Loading saved card");
        let tiles: Vec<Tile> = card.data().iter().map(Tile::text).collect();
        let name = card.name().clone();
        match CardInput::Tiles(tiles).normalize(self.size) {
            Ok(tiles) => self.render_tiles(tiles, Some(name)),
            Err(e) => {
                warn!(error = %e, "Saved card failed normalization");
                self.status = format!("Saved card unusable: {e}");
            }
        }
    }

    fn render_tiles(&mut self, tiles: Vec<Tile>, pool_name: Option<String>) {
        match Board::new(tiles, self.size) {
            Ok(board) => {
                self.session.set_board(board, pool_name);
                self.cursor = 0;
                self.status = default_status(self.session.pool_name());
            }
            Err(e) => {
                warn!(error = %e, "Board construction failed");
                self.status = format!("Card unusable: {e}");
            }
        }
    }
}

fn default_status(pool_name: Option<&str>) -> String {
    match pool_name {
        Some(name) => format!("{name} — space marks, n new card, s save, v saved, q quit"),
        None => "space marks, n new card, s save, v saved, q quit".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CardStore;

    fn test_app_with_size(size: usize) -> (App, mpsc::UnboundedReceiver<CardEvent>) {
        let dir = std::env::temp_dir().join(format!("tilebingo_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("Tempdir failed");
        let store = CardStore::new(dir.join("cards.json"));
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(
            PageSession::new(store),
            TilePoolClient::new("http://localhost:3000"),
            size,
            None,
            tx,
        );
        (app, rx)
    }

    fn test_app() -> (App, mpsc::UnboundedReceiver<CardEvent>) {
        test_app_with_size(5)
    }

    fn ready(generation: u64) -> CardEvent {
        let mut tiles: Vec<Tile> = (0..24).map(|i| Tile::text(format!("t{i}"))).collect();
        tiles.insert(12, Tile::free());
        CardEvent::CardReady {
            generation,
            pool_name: "nouns".to_string(),
            tiles,
        }
    }

    #[test]
    fn test_current_generation_renders() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));
        assert!(app.session().board().is_some());
        assert_eq!(app.session().pool_name(), Some("nouns"));
    }

    #[test]
    fn test_stale_card_discarded() {
        let (mut app, _rx) = test_app();
        app.generation = 3;
        app.handle_event(ready(2));
        assert!(app.session().board().is_none());
    }

    #[test]
    fn test_stale_failure_discarded() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));
        app.generation = 5;
        app.handle_event(CardEvent::FetchFailed {
            generation: 4,
            message: "boom".to_string(),
        });
        assert!(!app.status().contains("boom"));
    }

    #[test]
    fn test_failure_keeps_previous_board() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));
        app.handle_event(CardEvent::FetchFailed {
            generation: 0,
            message: "server exploded".to_string(),
        });
        assert!(app.session().board().is_some());
        assert!(app.status().contains("server exploded"));
    }

    #[test]
    fn test_toggle_and_win_status() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));

        // Mark the middle row around the free center.
        for col in [0isize, 1, 3, 4] {
            app.cursor = (2 * 5 + col) as usize;
            app.handle_key(KeyCode::Char(' '));
        }
        assert_eq!(app.status(), "BINGO! You have a winning card!");
    }

    #[test]
    fn test_words_render_through_flat_path() {
        let (mut app, _rx) = test_app();
        app.use_words((0..24).map(|i| format!("w{i}")).collect());

        let board = app.session().board().expect("No board");
        assert_eq!(board.cells().len(), 25);
        assert!(board.get(12).expect("No cell").is_free());
        assert_eq!(board.get(0).expect("No cell").tile().content(), "w0");
        assert_eq!(app.session().pool_name(), None);
    }

    #[test]
    fn test_short_word_list_keeps_previous_board() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));
        app.use_words(vec!["only one word".to_string()]);

        let board = app.session().board().expect("No board");
        assert_eq!(board.get(0).expect("No cell").tile().content(), "t0");
        assert!(app.status().contains("unusable"));
    }

    #[test]
    fn test_zero_size_board_ignores_cursor_keys() {
        let (mut app, _rx) = test_app_with_size(0);
        app.handle_event(CardEvent::CardReady {
            generation: 0,
            pool_name: "empty".to_string(),
            tiles: Vec::new(),
        });
        assert!(app.session().board().is_some());

        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamped_to_grid() {
        let (mut app, _rx) = test_app();
        app.handle_event(ready(0));
        for _ in 0..10 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.cursor(), 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.cursor(), 4);
    }
}
