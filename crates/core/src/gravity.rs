//! Match removal, gravity and refill
//!
//! Removal empties the union of all matched positions. Gravity then works
//! column by column: surviving gems slide down to fill the gaps without
//! changing their relative order, and the vacated cells at the top of the
//! column receive freshly spawned gems. Afterwards every cell is occupied.

use serde::Serialize;

use crate::board::Board;
use crate::matcher::{matched_positions, Match};
use crate::rng::RandomSource;
use crate::types::Position;

/// A surviving gem that moved down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fall {
    pub gem_id: u32,
    pub from: Position,
    pub to: Position,
}

/// What gravity did, for presentation continuity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GravityReport {
    /// Gems that fell, column by column, bottom-most first
    pub falls: Vec<Fall>,
    /// Cells that received a new gem, column by column, top to bottom
    pub spawned: Vec<Position>,
}

/// Empty every matched cell. Returns the removed positions (row-major, deduplicated).
pub fn remove_matches(board: &mut Board, matches: &[Match]) -> Vec<Position> {
    let removed = matched_positions(matches);
    for &pos in &removed {
        board.set(pos, None);
    }
    removed
}

/// Compact each column downward and refill the top with new gems.
pub fn apply_gravity<R: RandomSource>(board: &mut Board, rng: &mut R) -> GravityReport {
    let n = board.size();
    let mut report = GravityReport::default();

    for col in 0..n {
        // Two-pointer compaction from the bottom up
        let mut write = n;
        for read in (0..n).rev() {
            let from = Position::new(read, col);
            if let Some(gem) = board.take(from) {
                write -= 1;
                let to = Position::new(write, col);
                if to != from {
                    report.falls.push(Fall {
                        gem_id: gem.id,
                        from,
                        to,
                    });
                }
                board.set(to, Some(gem));
            }
        }

        for row in 0..write {
            let kind = board.random_kind(rng);
            let gem = board.spawn_gem(kind);
            let pos = Position::new(row, col);
            board.set(pos, Some(gem));
            report.spawned.push(pos);
        }
    }

    debug_assert!(board.is_full());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_matches;
    use crate::rng::SimpleRng;
    use crate::types::GemKind;

    #[test]
    fn test_removal_clears_union_once() {
        let mut board = Board::parse("RRR BRB GRG").unwrap();
        let matches = find_matches(&board);
        let removed = remove_matches(&mut board, &matches);
        assert_eq!(removed.len(), 5);
        assert_eq!(board.to_string(), "...\nB.B\nG.G\n");
    }

    #[test]
    fn test_survivors_fall_in_order_and_top_is_refilled() {
        // Column 0 from top: Y, P, R, R, R (bottom three get removed)
        let mut board = Board::parse("YBGOP PGBYO RBYGB RYGBY RGBYG").unwrap();
        let y_id = board.get(Position::new(0, 0)).flatten().unwrap().id;
        let p_id = board.get(Position::new(1, 0)).flatten().unwrap().id;
        let next_id = board.next_id();

        let matches = find_matches(&board);
        assert_eq!(matches.len(), 1);
        remove_matches(&mut board, &matches);

        let report = apply_gravity(&mut board, &mut SimpleRng::new(1));
        assert!(board.is_full());

        // Relative order kept: purple below yellow at the bottom
        let bottom = board.get(Position::new(4, 0)).flatten().unwrap();
        let above = board.get(Position::new(3, 0)).flatten().unwrap();
        assert_eq!((bottom.id, bottom.kind), (p_id, GemKind::Purple));
        assert_eq!((above.id, above.kind), (y_id, GemKind::Yellow));

        assert_eq!(
            report.falls,
            vec![
                Fall {
                    gem_id: p_id,
                    from: Position::new(1, 0),
                    to: Position::new(4, 0)
                },
                Fall {
                    gem_id: y_id,
                    from: Position::new(0, 0),
                    to: Position::new(3, 0)
                },
            ]
        );
        assert_eq!(
            report.spawned,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0)
            ]
        );

        // Fresh ids for the refilled cells
        for row in 0..3 {
            let gem = board.get(Position::new(row, 0)).flatten().unwrap();
            assert!(gem.id >= next_id);
        }
    }

    #[test]
    fn test_untouched_columns_do_not_move() {
        let mut board = Board::parse("RBG BGR GRB").unwrap();
        let before = board.clone();
        let report = apply_gravity(&mut board, &mut SimpleRng::new(9));
        assert!(report.falls.is_empty());
        assert!(report.spawned.is_empty());
        assert_eq!(board, before);
    }
}
