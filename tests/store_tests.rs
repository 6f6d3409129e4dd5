//! JSON leaderboard file tests

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use gem_cascade::store::{
    JsonFileStore, ScoreStore, SessionRecord, StoreError, MAX_LEADERBOARD_ENTRIES,
};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory under the system temp dir, unique per test
fn scratch_dir() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("gem-cascade-store-{}-{}", process::id(), n));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = scratch_dir();
    let store = JsonFileStore::new(dir.join("nothing.json"));
    assert!(store.top(10).unwrap().is_empty());
    assert_eq!(store.best_score().unwrap(), 0);
}

#[test]
fn test_save_creates_parent_dirs_and_round_trips() {
    let dir = scratch_dir();
    let path = dir.join("nested").join("leaderboard.json");
    let mut store = JsonFileStore::new(&path);

    let record = SessionRecord::new(420, 17, 60);
    store.save(record).unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.top(10).unwrap(), vec![record]);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[0]["score"], 420);
    assert_eq!(raw[0]["moves"], 17);
    assert_eq!(raw[0]["time"], 60);
    assert!(raw[0]["date"].as_str().unwrap().contains('T'));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_file_store_ranks_and_truncates() {
    let dir = scratch_dir();
    let mut store = JsonFileStore::new(dir.join("board.json"));
    for score in [50, 10, 90, 30, 70, 20, 80, 40, 60, 100, 5, 95] {
        store.save(SessionRecord::new(score, 1, 60)).unwrap();
    }

    let scores: Vec<u32> = store.top(usize::MAX).unwrap().iter().map(|r| r.score).collect();
    assert_eq!(scores.len(), MAX_LEADERBOARD_ENTRIES);
    assert_eq!(scores, vec![100, 95, 90, 80, 70, 60, 50, 40, 30, 20]);
    assert_eq!(store.top(3).unwrap().len(), 3);
    assert_eq!(store.best_score().unwrap(), 100);

    store.clear().unwrap();
    assert!(store.top(10).unwrap().is_empty());
    store.clear().unwrap();

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.json");
    fs::write(&path, "not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.top(1), Err(StoreError::Serialization { .. })));

    fs::remove_dir_all(dir).unwrap();
}
