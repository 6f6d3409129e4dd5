//! Board module - manages the gem grid
//!
//! The board is an NxN grid where each cell holds a gem or is empty.
//! Uses a flat vector in row-major order (`row * size + col`).
//! Coordinates: `(row, col)` where row 0 is the top and col 0 is the left.
//!
//! At rest every cell is occupied; cells are empty only between
//! [`remove_matches`](crate::remove_matches) and [`apply_gravity`](crate::apply_gravity).
//! Gem ids are handed out by the board and never reused.

use std::fmt;

use crate::config::BoardConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::rng::RandomSource;
use crate::types::{Cell, Gem, GemKind, Position, DEFAULT_GEM_KINDS};

/// The game board, `size` x `size` cells in flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
    /// Id given to the next spawned gem
    next_id: u32,
}

impl Board {
    /// Create a board with every cell empty. Callers fill it before handing it out.
    pub(crate) fn empty(config: BoardConfig) -> Self {
        let n = config.size() as usize;
        Self {
            config,
            cells: vec![None; n * n],
            next_id: 1,
        }
    }

    /// Build a board from rows of gem kinds, assigning ids row-major from 1.
    ///
    /// Refills draw from all six kinds. The layout is taken as given, so it
    /// may contain matches (useful for setting up scenarios).
    pub fn from_kinds(rows: &[Vec<GemKind>]) -> ConfigResult<Self> {
        let config = BoardConfig::new(rows.len(), DEFAULT_GEM_KINDS as usize)?;
        let mut board = Self::empty(config);
        for (row, kinds) in rows.iter().enumerate() {
            if kinds.len() != rows.len() {
                return Err(ConfigError::NotSquare {
                    row,
                    len: kinds.len(),
                    expected: rows.len(),
                });
            }
            for (col, &kind) in kinds.iter().enumerate() {
                let gem = board.spawn_gem(kind);
                board.set(Position::new(row as u8, col as u8), Some(gem));
            }
        }
        Ok(board)
    }

    /// Parse a board from whitespace-separated rows of gem symbols (`R B G Y P O`).
    ///
    /// ```
    /// use gem_cascade_core::Board;
    /// use gem_cascade_core::types::{GemKind, Position};
    ///
    /// let board = Board::parse("RRB BGR GBG").unwrap();
    /// assert_eq!(board.kind_at(Position::new(1, 2)), Some(GemKind::Red));
    /// ```
    pub fn parse(layout: &str) -> ConfigResult<Self> {
        let mut rows = Vec::new();
        for (row, line) in layout.split_whitespace().enumerate() {
            let kinds = line
                .chars()
                .enumerate()
                .map(|(col, symbol)| {
                    GemKind::from_symbol(symbol)
                        .ok_or(ConfigError::UnknownSymbol { symbol, row, col })
                })
                .collect::<ConfigResult<Vec<_>>>()?;
            rows.push(kinds);
        }
        Self::from_kinds(&rows)
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        let n = self.config.size();
        if pos.row >= n || pos.col >= n {
            return None;
        }
        Some(pos.row as usize * n as usize + pos.col as usize)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        self.config.size()
    }

    /// Check if position is inside the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at position. Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Kind of the gem at position, if in bounds and occupied
    #[inline]
    pub fn kind_at(&self, pos: Position) -> Option<GemKind> {
        self.get(pos).flatten().map(|gem| gem.kind)
    }

    /// Set cell at position. Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell and return what it held
    pub(crate) fn take(&mut self, pos: Position) -> Cell {
        self.index(pos).and_then(|idx| self.cells[idx].take())
    }

    /// Exchange the contents of two cells. Returns false (and does nothing)
    /// if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Allocate a new gem with a fresh id
    pub(crate) fn spawn_gem(&mut self, kind: GemKind) -> Gem {
        let gem = Gem::new(self.next_id, kind);
        self.next_id = self.next_id.wrapping_add(1);
        gem
    }

    /// Pick a kind uniformly from the configured kind set
    pub(crate) fn random_kind<R: RandomSource>(&self, rng: &mut R) -> GemKind {
        let kinds = self.config.kind_set();
        kinds[rng.next_range(kinds.len() as u32) as usize]
    }

    /// Id the next spawned gem will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// True if every cell holds a gem
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let n = self.config.size();
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    /// All gems in row-major order (empty cells skipped)
    pub fn gems(&self) -> impl Iterator<Item = Gem> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Place gems into the cells in row-major order. Expects one gem per cell.
    pub(crate) fn fill_from(&mut self, gems: &[Gem]) {
        debug_assert_eq!(gems.len(), self.cells.len());
        for (cell, gem) in self.cells.iter_mut().zip(gems) {
            *cell = Some(*gem);
        }
    }

    /// Number of gems of each kind, indexed like [`GemKind::ALL`]
    pub fn kind_counts(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for gem in self.gems() {
            counts[gem.kind as usize] += 1;
        }
        counts
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.config.size() as usize)
    }
}

impl fmt::Display for Board {
    /// One line per row, gems as their symbol and empty cells as `.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |gem| gem.kind.symbol()))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
