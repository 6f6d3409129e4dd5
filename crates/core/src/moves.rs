//! Adjacency and move availability
//!
//! A move is legal when two orthogonally adjacent gems can be exchanged and
//! the result contains at least one match. The availability check is
//! exhaustive over the whole adjacency graph: every cell paired with its
//! right and lower neighbour covers each edge exactly once.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::matcher::has_any_match;
use crate::types::{Position, Swap};

/// Strict 4-directional adjacency. False for equal positions and diagonals.
pub fn are_adjacent(a: Position, b: Position) -> bool {
    a.is_adjacent(b)
}

/// In-bounds orthogonal neighbours of `pos` (up, down, left, right order)
pub fn neighbours(board: &Board, pos: Position) -> ArrayVec<Position, 4> {
    let mut out = ArrayVec::new();
    let n = board.size();
    if pos.row > 0 {
        out.push(Position::new(pos.row - 1, pos.col));
    }
    if pos.row + 1 < n {
        out.push(Position::new(pos.row + 1, pos.col));
    }
    if pos.col > 0 {
        out.push(Position::new(pos.row, pos.col - 1));
    }
    if pos.col + 1 < n {
        out.push(Position::new(pos.row, pos.col + 1));
    }
    out
}

/// Right and lower neighbours only, so each adjacent pair is visited once
fn forward_neighbours(board: &Board, pos: Position) -> ArrayVec<Position, 2> {
    let mut out = ArrayVec::new();
    let n = board.size();
    if pos.col + 1 < n {
        out.push(Position::new(pos.row, pos.col + 1));
    }
    if pos.row + 1 < n {
        out.push(Position::new(pos.row + 1, pos.col));
    }
    out
}

/// Would exchanging `a` and `b` leave a match on the board?
///
/// Out-of-bounds or non-adjacent pairs are never legal.
pub fn swap_creates_match(board: &Board, a: Position, b: Position) -> bool {
    if !are_adjacent(a, b) || !board.contains(a) || !board.contains(b) {
        return false;
    }
    let mut scratch = board.clone();
    scratch.swap(a, b);
    has_any_match(&scratch)
}

/// Visit every adjacent pair on a scratch copy; `visit` returns false to stop.
fn for_each_valid_move<F>(board: &Board, mut visit: F)
where
    F: FnMut(Swap) -> bool,
{
    let mut scratch = board.clone();
    for a in board.positions() {
        for b in forward_neighbours(board, a) {
            scratch.swap(a, b);
            let hit = has_any_match(&scratch);
            scratch.swap(a, b);
            if hit && !visit(Swap::new(a, b)) {
                return;
            }
        }
    }
}

/// First legal move in row-major scan order, if any
pub fn find_valid_move(board: &Board) -> Option<Swap> {
    let mut found = None;
    for_each_valid_move(board, |swap| {
        found = Some(swap);
        false
    });
    found
}

/// True if at least one swap produces a match. False means deadlock.
pub fn has_valid_moves(board: &Board) -> bool {
    find_valid_move(board).is_some()
}

/// Every legal move, in row-major scan order
pub fn valid_moves(board: &Board) -> Vec<Swap> {
    let mut moves = Vec::new();
    for_each_valid_move(board, |swap| {
        moves.push(swap);
        true
    });
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let p = Position::new(0, 0);
        assert!(are_adjacent(p, Position::new(0, 1)));
        assert!(are_adjacent(p, Position::new(1, 0)));
        assert!(!are_adjacent(p, p));
        assert!(!are_adjacent(p, Position::new(1, 1)));
        assert!(!are_adjacent(p, Position::new(0, 2)));
        assert!(!are_adjacent(p, Position::new(2, 2)));
    }

    #[test]
    fn test_neighbour_counts() {
        let board = Board::parse("RBG BGR GRB").unwrap();
        assert_eq!(neighbours(&board, Position::new(0, 0)).len(), 2);
        assert_eq!(neighbours(&board, Position::new(0, 1)).len(), 3);
        assert_eq!(neighbours(&board, Position::new(1, 1)).len(), 4);
        assert_eq!(neighbours(&board, Position::new(2, 2)).len(), 2);
    }

    #[test]
    fn test_finds_the_only_move() {
        // Swapping (1,0) and (1,1) puts R into column 1 between two Rs.
        let board = Board::parse("BRG RBY GRP").unwrap();
        let only = Swap::new(Position::new(1, 0), Position::new(1, 1));
        assert!(has_valid_moves(&board));
        assert_eq!(find_valid_move(&board), Some(only));
        assert_eq!(valid_moves(&board), vec![only]);
        assert!(swap_creates_match(&board, only.a, only.b));
        assert!(swap_creates_match(&board, only.b, only.a));
    }

    #[test]
    fn test_deadlocked_board() {
        let board = Board::parse("RBG GRB BGR").unwrap();
        assert!(!has_valid_moves(&board));
        assert!(valid_moves(&board).is_empty());
    }

    #[test]
    fn test_swap_creates_match_rejects_bad_pairs() {
        let board = Board::parse("BRG RBY GRP").unwrap();
        assert!(!swap_creates_match(&board, Position::new(0, 0), Position::new(1, 1)));
        assert!(!swap_creates_match(&board, Position::new(2, 2), Position::new(2, 3)));
    }
}
