//! Match detection
//!
//! Rows are scanned left to right and columns top to bottom. Every maximal
//! run of at least [`MIN_MATCH_LEN`] equal kinds produces exactly one
//! [`Match`]; shorter sub-runs of a longer run are never reported. Empty
//! cells break runs.
//!
//! Results are ordered: horizontal matches row-major, then vertical matches
//! column-major. A gem where a horizontal and a vertical run cross appears in
//! both records.

use serde::Serialize;

use crate::board::Board;
use crate::types::{GemKind, Orientation, Position, MIN_MATCH_LEN};

/// A maximal run of equal gems in one row or column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub kind: GemKind,
    pub orientation: Orientation,
    /// Positions along the run, in scan order
    pub positions: Vec<Position>,
}

impl Match {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[inline]
fn at(orientation: Orientation, line: u8, index: u8) -> Position {
    match orientation {
        Orientation::Horizontal => Position::new(line, index),
        Orientation::Vertical => Position::new(index, line),
    }
}

/// Walk every maximal qualifying run in one orientation.
///
/// `visit` gets `(kind, line, start, end)` with `end` exclusive and returns
/// `false` to stop early. Returns `false` if stopped.
fn scan_runs<F>(board: &Board, orientation: Orientation, mut visit: F) -> bool
where
    F: FnMut(GemKind, u8, u8, u8) -> bool,
{
    let n = board.size();
    for line in 0..n {
        let mut start = 0u8;
        while start < n {
            let Some(kind) = board.kind_at(at(orientation, line, start)) else {
                start += 1;
                continue;
            };
            let mut end = start + 1;
            while end < n && board.kind_at(at(orientation, line, end)) == Some(kind) {
                end += 1;
            }
            if (end - start) as usize >= MIN_MATCH_LEN && !visit(kind, line, start, end) {
                return false;
            }
            start = end;
        }
    }
    true
}

/// Find all matches on the board, horizontal first.
pub fn find_matches(board: &Board) -> Vec<Match> {
    let mut matches = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        scan_runs(board, orientation, |kind, line, start, end| {
            matches.push(Match {
                kind,
                orientation,
                positions: (start..end).map(|i| at(orientation, line, i)).collect(),
            });
            true
        });
    }
    matches
}

/// True if the board contains at least one match. Does not allocate.
pub fn has_any_match(board: &Board) -> bool {
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .any(|orientation| !scan_runs(board, orientation, |_, _, _, _| false))
}

/// Union of all matched positions, deduplicated, in row-major order.
pub fn matched_positions(matches: &[Match]) -> Vec<Position> {
    let mut positions: Vec<Position> = matches
        .iter()
        .flat_map(|m| m.positions.iter().copied())
        .collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}
