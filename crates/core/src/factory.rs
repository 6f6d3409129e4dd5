//! Board factory - match-free initial layouts
//!
//! Cells are filled row-major. For each cell the kinds that would complete a
//! run of three with the two cells to the left or the two cells above are
//! excluded, and one of the remaining kinds is drawn at random. At most two
//! kinds are ever excluded and a [`BoardConfig`] guarantees at least three,
//! so a candidate always exists and no retry loop is needed.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::config::BoardConfig;
use crate::matcher::has_any_match;
use crate::rng::RandomSource;
use crate::types::{GemKind, Position};

impl Board {
    /// Generate a fresh board with no matches.
    pub fn generate<R: RandomSource>(config: &BoardConfig, rng: &mut R) -> Self {
        let mut board = Board::empty(*config);
        board.regenerate(rng);
        board
    }

    /// Replace every gem with a freshly generated one, keeping the id counter
    /// running so ids of discarded gems are not reused.
    pub fn regenerate<R: RandomSource>(&mut self, rng: &mut R) {
        let n = self.size();
        for row in 0..n {
            for col in 0..n {
                self.set(Position::new(row, col), None);
            }
        }

        for row in 0..n {
            for col in 0..n {
                let candidates: ArrayVec<GemKind, 6> = self
                    .config()
                    .kind_set()
                    .iter()
                    .copied()
                    .filter(|&kind| !self.completes_run(row, col, kind))
                    .collect();
                let kind = candidates[rng.next_range(candidates.len() as u32) as usize];
                let gem = self.spawn_gem(kind);
                self.set(Position::new(row, col), Some(gem));
            }
        }

        debug_assert!(!has_any_match(self));
        debug!(size = n, next_id = self.next_id(), "generated board");
    }

    /// Would placing `kind` at (row, col) complete a run with the two
    /// already-filled cells to its left or above?
    fn completes_run(&self, row: u8, col: u8, kind: GemKind) -> bool {
        let left = col >= 2
            && self.kind_at(Position::new(row, col - 1)) == Some(kind)
            && self.kind_at(Position::new(row, col - 2)) == Some(kind);
        let above = row >= 2
            && self.kind_at(Position::new(row - 1, col)) == Some(kind)
            && self.kind_at(Position::new(row - 2, col)) == Some(kind);
        left || above
    }
}
