//! Leaderboard persistence
//!
//! A finished game is recorded as a [`SessionRecord`]. Stores keep only the
//! best [`MAX_LEADERBOARD_ENTRIES`] records, ranked by score (higher first)
//! and, for equal scores, by date (earlier first).
//!
//! | Store | Backing | Use |
//! |-------|---------|-----|
//! | [`MemoryStore`] | `Vec` | tests, headless runs |
//! | [`JsonFileStore`] | pretty JSON array on disk | the binary |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Number of records kept on the leaderboard
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// One finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub score: u32,
    /// When the game finished, ISO-8601 on disk
    pub date: DateTime<Utc>,
    pub moves: u32,
    /// Seconds played
    pub time: u32,
}

impl SessionRecord {
    pub fn new(score: u32, moves: u32, time: u32) -> Self {
        Self {
            score,
            date: Utc::now(),
            moves,
            time,
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("leaderboard i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("leaderboard file {path} is not valid JSON: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for finished sessions
pub trait ScoreStore {
    /// Insert a record; it is dropped if it does not make the leaderboard.
    fn save(&mut self, record: SessionRecord) -> StoreResult<()>;

    /// Best `n` records, best first
    fn top(&self, n: usize) -> StoreResult<Vec<SessionRecord>>;

    fn clear(&mut self) -> StoreResult<()>;

    /// Highest score ever kept, 0 when empty
    fn best_score(&self) -> StoreResult<u32> {
        Ok(self.top(1)?.first().map_or(0, |r| r.score))
    }
}

/// Insert `record` in rank order and truncate to the leaderboard size.
pub fn insert_ranked(entries: &mut Vec<SessionRecord>, record: SessionRecord) {
    let at = entries
        .iter()
        .position(|e| ranks_before(&record, e))
        .unwrap_or(entries.len());
    entries.insert(at, record);
    entries.truncate(MAX_LEADERBOARD_ENTRIES);
}

fn ranks_before(a: &SessionRecord, b: &SessionRecord) -> bool {
    a.score > b.score || (a.score == b.score && a.date < b.date)
}

/// In-memory leaderboard
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn save(&mut self, record: SessionRecord) -> StoreResult<()> {
        insert_ranked(&mut self.entries, record);
        Ok(())
    }

    fn top(&self, n: usize) -> StoreResult<Vec<SessionRecord>> {
        Ok(self.entries.iter().take(n).copied().collect())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Leaderboard kept as a JSON array in a single file.
///
/// The file is read on every query and rewritten on every change. A missing
/// file is an empty leaderboard; parent directories are created on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/gem-cascade/leaderboard.json`, falling back to
    /// `~/.config` and then the working directory.
    pub fn default_path() -> PathBuf {
        let base = match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => std::env::var("HOME")
                .map(|h| PathBuf::from(h).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".")),
        };
        base.join("gem-cascade").join("leaderboard.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> StoreResult<Vec<SessionRecord>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&content).map_err(|source| StoreError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, entries: &[SessionRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let json =
            serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), entries = entries.len(), "leaderboard written");
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save(&mut self, record: SessionRecord) -> StoreResult<()> {
        let mut entries = self.load()?;
        insert_ranked(&mut entries, record);
        self.write(&entries)
    }

    fn top(&self, n: usize) -> StoreResult<Vec<SessionRecord>> {
        let mut entries = self.load()?;
        entries.truncate(n);
        Ok(entries)
    }

    fn clear(&mut self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "leaderboard cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
