//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and small
//! geometric helpers, making them usable in any context (engine, session,
//! store, JSON output).
//!
//! # Board Dimensions
//!
//! The board is always square:
//!
//! - **Default side**: 8 (rows and columns indexed 0-7)
//! - **Allowed side**: 3..=16
//! - **Coordinates**: `(row, col)`, row 0 is the top, col 0 is the left
//!
//! # Gem Kinds
//!
//! Six kinds exist. A board may be configured to use a prefix of
//! [`GemKind::ALL`] (at least 3, otherwise a match-free board cannot be
//! generated).
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_GEM` | 10 | Base points for each matched gem |
//! | `RUN_BONUS_STEP` | 1 | Extra per-gem multiplier for each gem beyond 3 in a run |
//! | `COMBO_STEP` | 1 | Extra multiplier per cascade level |
//!
//! # Examples
//!
//! ```
//! use gem_cascade_types::{GemKind, Position, DEFAULT_BOARD_SIZE};
//!
//! let kind = GemKind::from_str("red").unwrap();
//! assert_eq!(kind, GemKind::Red);
//! assert_eq!(kind.symbol(), 'R');
//!
//! let a = Position::new(2, 3);
//! assert!(a.is_adjacent(Position::new(2, 4)));
//! assert!(!a.is_adjacent(Position::new(3, 4)));
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default board side (8x8)
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// Smallest board on which a match-free layout with a legal move can exist
pub const MIN_BOARD_SIZE: u8 = 3;

/// Largest supported board side
pub const MAX_BOARD_SIZE: u8 = 16;

/// Minimum run length that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Number of gem kinds in play by default (all of them)
pub const DEFAULT_GEM_KINDS: u8 = 6;

/// Fewest gem kinds that still allow match-free generation
pub const MIN_GEM_KINDS: u8 = 3;

/// Base points for each matched gem
pub const POINTS_PER_GEM: u32 = 10;

/// Per-gem multiplier increase for every gem beyond `MIN_MATCH_LEN` in a run
pub const RUN_BONUS_STEP: u32 = 1;

/// Multiplier increase per cascade level (level 0 = x1, level 1 = x2, ...)
pub const COMBO_STEP: u32 = 1;

/// Shuffle attempts before falling back to full regeneration
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 100;

/// Length of one game session in seconds
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_within_bounds() {
        assert!(DEFAULT_BOARD_SIZE >= MIN_BOARD_SIZE);
        assert!(DEFAULT_BOARD_SIZE <= MAX_BOARD_SIZE);
        assert!(DEFAULT_GEM_KINDS >= MIN_GEM_KINDS);
        assert_eq!(DEFAULT_GEM_KINDS as usize, GemKind::ALL.len());
    }

    #[test]
    fn test_gem_kind_round_trips_through_str() {
        for kind in GemKind::ALL {
            assert_eq!(GemKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(GemKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(GemKind::from_str("ORANGE"), Some(GemKind::Orange));
        assert_eq!(GemKind::from_str("pink"), None);
    }

    #[test]
    fn test_adjacency_is_strictly_orthogonal() {
        let p = Position::new(4, 4);
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(p.is_adjacent(Position::new(5, 4)));
        assert!(p.is_adjacent(Position::new(4, 3)));
        assert!(p.is_adjacent(Position::new(4, 5)));

        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(5, 5)));
        assert!(!p.is_adjacent(Position::new(3, 3)));
        assert!(!p.is_adjacent(Position::new(4, 6)));
        assert!(!p.is_adjacent(Position::new(6, 4)));
    }
}

/// The six gem kinds
///
/// Each kind has a fixed colour and a single-letter symbol used by text
/// renderers and board literals in tests:
/// - **Red** `R`
/// - **Blue** `B`
/// - **Green** `G`
/// - **Yellow** `Y`
/// - **Purple** `P`
/// - **Orange** `O`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl GemKind {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    /// Parse gem kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_types::GemKind;
    ///
    /// assert_eq!(GemKind::from_str("Blue"), Some(GemKind::Blue));
    /// assert_eq!(GemKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(GemKind::Red),
            "blue" => Some(GemKind::Blue),
            "green" => Some(GemKind::Green),
            "yellow" => Some(GemKind::Yellow),
            "purple" => Some(GemKind::Purple),
            "orange" => Some(GemKind::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GemKind::Red => "red",
            GemKind::Blue => "blue",
            GemKind::Green => "green",
            GemKind::Yellow => "yellow",
            GemKind::Purple => "purple",
            GemKind::Orange => "orange",
        }
    }

    /// Single uppercase letter for text output
    pub fn symbol(&self) -> char {
        match self {
            GemKind::Red => 'R',
            GemKind::Blue => 'B',
            GemKind::Green => 'G',
            GemKind::Yellow => 'Y',
            GemKind::Purple => 'P',
            GemKind::Orange => 'O',
        }
    }

    /// Inverse of [`GemKind::symbol`] (case-insensitive)
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(GemKind::Red),
            'B' => Some(GemKind::Blue),
            'G' => Some(GemKind::Green),
            'Y' => Some(GemKind::Yellow),
            'P' => Some(GemKind::Purple),
            'O' => Some(GemKind::Orange),
            _ => None,
        }
    }
}

/// A gem on the board
///
/// `id` identifies the physical gem for presentation continuity: it follows
/// the gem through falls and shuffles and is never handed out again once
/// the gem is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    pub kind: GemKind,
}

impl Gem {
    pub fn new(id: u32, kind: GemKind) -> Self {
        Self { id, kind }
    }
}

/// A cell on the board
///
/// - `None`: empty (only while matches are being removed and refilled)
/// - `Some(Gem)`: occupied
pub type Cell = Option<Gem>;

/// Board coordinate, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Strict 4-directional adjacency: exactly one coordinate differs, by exactly 1.
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of a run of matching gems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An unordered pair of positions to exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    pub a: Position,
    pub b: Position,
}

impl Swap {
    pub const fn new(a: Position, b: Position) -> Self {
        Self { a, b }
    }
}
