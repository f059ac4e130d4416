//! Full board lifecycle against the real file-backed store.

use std::fs;

use chrono::NaiveDate;

use projectboard::board::{Board, Mutation};
use projectboard::project::{Status, DUE_DATE_FORMAT};
use projectboard::storage::JsonFileStorage;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).unwrap()
}

#[test]
fn mutations_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");

    let mut board = Board::open(JsonFileStorage::new(&path));
    let site = board
        .create_project("Site".into(), "Web".into(), "01/01/2027".into())
        .unwrap();
    let deck = board
        .create_project("Deck".into(), "Pitch".into(), String::new())
        .unwrap();
    board.move_project(&site.id, Status::InProgress).unwrap();
    board.delete_project(&deck.id).unwrap();

    let reopened = Board::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.projects().len(), 1);
    assert_eq!(reopened.projects()[0].id, site.id);
    assert_eq!(reopened.projects()[0].status, Status::InProgress);
    assert_eq!(reopened.projects()[0].due_date, "01/01/2027");
}

#[test]
fn reads_a_board_file_written_by_the_browser_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    fs::write(
        &path,
        r#"[
            {"id":"a1","name":"Site","type":"Web","dueDate":"01/01/2024","status":"todo"},
            {"id":"b2","name":"Deck","type":"Pitch","dueDate":"","status":"done"},
            {"id":"c3","name":"Ghost","type":"Web","dueDate":"","status":"archived"}
        ]"#,
    )
    .unwrap();

    let board = Board::open(JsonFileStorage::new(&path));
    assert_eq!(board.projects().len(), 3);

    let lanes = board.lanes(date("02/01/2024"));
    assert_eq!(lanes.todo.len(), 1);
    assert_eq!(lanes.done.len(), 1);
    assert!(lanes.in_progress.is_empty());
    // "archived" is kept in the collection but rendered in no lane.
    assert_eq!(
        board.projects()[2].status,
        Status::Other("archived".into())
    );
}

#[test]
fn corrupt_board_file_starts_empty_and_is_replaced_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    fs::write(&path, "definitely not json").unwrap();

    let mut board = Board::open(JsonFileStorage::new(&path));
    assert!(board.projects().is_empty());

    board
        .create_project("Fresh".into(), "Web".into(), String::new())
        .unwrap();

    let reopened = Board::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.projects().len(), 1);
    assert_eq!(reopened.projects()[0].name, "Fresh");
}

#[test]
fn deleting_twice_matches_deleting_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");

    let mut board = Board::open(JsonFileStorage::new(&path));
    let keep = board
        .create_project("Keep".into(), "Web".into(), String::new())
        .unwrap();
    let drop = board
        .create_project("Drop".into(), "Web".into(), String::new())
        .unwrap();

    assert_eq!(board.delete_project(&drop.id).unwrap(), Mutation::Applied);
    assert_eq!(board.delete_project(&drop.id).unwrap(), Mutation::NotFound);

    let reopened = Board::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.projects().len(), 1);
    assert_eq!(reopened.projects()[0].id, keep.id);
}
