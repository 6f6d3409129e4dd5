//! Error types for engine configuration
//!
//! Only construction can fail. Once a [`BoardConfig`](crate::BoardConfig)
//! exists, generation, cascades and shuffles are infallible; bad player input
//! is reported through outcome enums instead of errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board side outside the supported range
    #[error("board size {size} is outside the supported range {min}..={max}")]
    BoardSize { size: usize, min: u8, max: u8 },

    /// Too few (or too many) gem kinds to generate a match-free board
    #[error("{kinds} gem kinds configured, expected {min}..={max}")]
    GemKinds { kinds: usize, min: u8, max: u8 },

    /// Board literal with a row whose length differs from the row count
    #[error("board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Board literal with an unknown gem symbol
    #[error("unknown gem symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
