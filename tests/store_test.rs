//! Tests for the saved-card store.

use tempfile::TempDir;

use tilebingo::{CardStore, MAX_SAVED_CARDS, SavedCard, StoreError};

/// Creates a store over a temp directory; the directory handle must stay in
/// scope to keep the backing file alive.
fn setup_store() -> (TempDir, CardStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = CardStore::new(dir.path().join("saved_bingo_cards.json"));
    (dir, store)
}

fn card(n: usize) -> SavedCard {
    SavedCard::new(format!("card {n}"), vec![format!("cell {n}")])
}

#[test]
fn test_missing_file_lists_empty() {
    let (_dir, store) = setup_store();
    let cards = store.list().expect("List failed");
    assert!(cards.is_empty());
}

#[test]
fn test_empty_file_lists_empty() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), "").expect("Write failed");
    let cards = store.list().expect("List failed");
    assert!(cards.is_empty());
}

#[test]
fn test_save_and_list_preserves_order() {
    let (_dir, store) = setup_store();
    for n in 0..5 {
        store.save(card(n)).expect("Save failed");
    }

    let cards = store.list().expect("List failed");
    assert_eq!(cards.len(), 5);
    for (n, saved) in cards.iter().enumerate() {
        assert_eq!(saved.name(), &format!("card {n}"));
    }
}

#[test]
fn test_load_by_index() {
    let (_dir, store) = setup_store();
    store.save(card(0)).expect("Save failed");
    store.save(card(1)).expect("Save failed");

    let loaded = store.load(1).expect("Load failed");
    assert_eq!(loaded.name(), "card 1");
    assert_eq!(loaded.data(), &vec!["cell 1".to_string()]);
}

#[test]
fn test_load_out_of_range_fails() {
    let (_dir, store) = setup_store();
    store.save(card(0)).expect("Save failed");

    let err = store.load(7).expect_err("Should fail");
    assert!(matches!(err, StoreError::NotFound { index: 7 }));
}

#[test]
fn test_cap_evicts_oldest_first() {
    let (_dir, store) = setup_store();
    for n in 0..=MAX_SAVED_CARDS {
        store.save(card(n)).expect("Save failed");
    }

    let cards = store.list().expect("List failed");
    assert_eq!(cards.len(), MAX_SAVED_CARDS);

    // The first-pushed card is gone; the most recent 50 remain in push order.
    assert_eq!(cards[0].name(), "card 1");
    assert_eq!(cards[MAX_SAVED_CARDS - 1].name(), &format!("card {MAX_SAVED_CARDS}"));
    for (i, saved) in cards.iter().enumerate() {
        assert_eq!(saved.name(), &format!("card {}", i + 1));
    }
}

#[test]
fn test_save_drains_over_cap_file_back_to_cap() {
    let (_dir, store) = setup_store();
    let bloated: Vec<SavedCard> = (0..60).map(card).collect();
    std::fs::write(
        store.path(),
        serde_json::to_string(&bloated).expect("Serialize failed"),
    )
    .expect("Write failed");

    store.save(card(60)).expect("Save failed");

    let cards = store.list().expect("List failed");
    assert_eq!(cards.len(), MAX_SAVED_CARDS);
    assert_eq!(cards[0].name(), "card 11");
    assert_eq!(cards[MAX_SAVED_CARDS - 1].name(), "card 60");
}

#[test]
fn test_persists_across_store_instances() {
    let (dir, store) = setup_store();
    store.save(card(0)).expect("Save failed");
    drop(store);

    let reopened = CardStore::new(dir.path().join("saved_bingo_cards.json"));
    let cards = reopened.list().expect("List failed");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name(), "card 0");
}

#[test]
fn test_corrupt_file_is_an_error() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), "not json").expect("Write failed");

    let result = store.list();
    assert!(matches!(result, Err(StoreError::Json(_))));
}
