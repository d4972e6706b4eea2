//! Behavioral tests for card normalization, board state, and win detection
//! through the public API.

use serde_json::json;

use tilebingo::{Board, CardInput, FREE_CONTENT, NormalizeError, Tile, check_win, normalize_value};

fn flat_words(n: usize) -> serde_json::Value {
    json!((0..n).map(|i| format!("word{i}")).collect::<Vec<_>>())
}

#[test]
fn test_twenty_four_words_become_a_full_card() {
    let tiles = normalize_value(&flat_words(24), 5).expect("Normalize failed");

    assert_eq!(tiles.len(), 25);
    assert_eq!(tiles[12].content(), FREE_CONTENT);

    let rest: Vec<&str> = tiles
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 12)
        .map(|(_, t)| t.content().as_str())
        .collect();
    let expected: Vec<String> = (0..24).map(|i| format!("word{i}")).collect();
    assert_eq!(rest, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_wrapped_tiles_takes_first_twenty_five() {
    let value = json!({"tiles": (0..30).map(|i| format!("t{i}")).collect::<Vec<_>>()});
    let tiles = normalize_value(&value, 5).expect("Normalize failed");
    assert_eq!(tiles.len(), 25);
    assert_eq!(tiles[24].content(), "t24");
}

#[test]
fn test_number_input_produces_no_grid() {
    let result = normalize_value(&json!(17), 5);
    assert!(matches!(result, Err(NormalizeError::UnsupportedShape { .. })));
}

#[test]
fn test_normalized_card_renders_and_plays() {
    let tiles = normalize_value(&flat_words(24), 5).expect("Normalize failed");
    let mut board = Board::new(tiles, 5).expect("Board failed");

    // Free center is pre-marked and locked.
    assert!(board.get(12).expect("No cell").marked());
    assert!(!board.toggle(12));

    // Column 2 runs through the free center: four toggles complete it.
    assert!(!board.has_win());
    for row in [0usize, 1, 3, 4] {
        assert!(board.toggle(row * 5 + 2));
    }
    assert!(board.has_win());
}

#[test]
fn test_loaded_card_keeps_free_cell_semantics() {
    // A saved card round-trips through the wrapped-tiles path with FREE
    // already placed.
    let mut data: Vec<String> = (0..25).map(|i| format!("cell {i}")).collect();
    data[12] = FREE_CONTENT.to_string();

    let tiles: Vec<Tile> = data.iter().map(Tile::text).collect();
    let tiles = CardInput::Tiles(tiles).normalize(5).expect("Normalize failed");
    let board = Board::new(tiles, 5).expect("Board failed");

    assert!(board.get(12).expect("No cell").is_free());
    assert!(board.get(12).expect("No cell").marked());
}

#[test]
fn test_check_win_truth_table_on_five_by_five() {
    let empty = vec![vec![false; 5]; 5];
    assert!(!check_win(&empty));

    let mut row2 = empty.clone();
    row2[2] = vec![true; 5];
    assert!(check_win(&row2));

    let mut main_diag = empty.clone();
    for i in 0..5 {
        main_diag[i][i] = true;
    }
    assert!(check_win(&main_diag));

    let mut anti_diag = empty.clone();
    for i in 0..5 {
        anti_diag[i][4 - i] = true;
    }
    assert!(check_win(&anti_diag));

    let mut near_miss = empty;
    for i in 0..4 {
        near_miss[i][i] = true;
        near_miss[i][4 - i] = true;
    }
    assert!(!check_win(&near_miss));
}

#[test]
fn test_check_win_sizes_other_than_five() {
    for size in 1..=7 {
        let empty = vec![vec![false; size]; size];
        assert!(!check_win(&empty), "all-false {size}x{size}");

        let mut col0 = empty;
        for row in col0.iter_mut() {
            row[0] = true;
        }
        assert!(check_win(&col0), "column win {size}x{size}");
    }
}
