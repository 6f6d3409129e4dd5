//! Match detection and move availability through the public API

use gem_cascade::core::{
    are_adjacent, find_matches, find_valid_move, has_valid_moves, matched_positions, valid_moves,
    Board,
};
use gem_cascade::types::{GemKind, Orientation, Position};

#[test]
fn test_single_horizontal_run() {
    let board = Board::from_kinds(&[
        vec![GemKind::Red, GemKind::Red, GemKind::Red],
        vec![GemKind::Blue, GemKind::Green, GemKind::Blue],
        vec![GemKind::Green, GemKind::Blue, GemKind::Green],
    ])
    .unwrap();

    let matches = find_matches(&board);
    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.kind, GemKind::Red);
    assert_eq!(m.orientation, Orientation::Horizontal);
    assert_eq!(
        m.positions,
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );
}

#[test]
fn test_runs_are_maximal() {
    let board = Board::parse("RRRRR BGBGB GBGBG BGBGB GBGBG").unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].len(), 5);
}

#[test]
fn test_two_runs_in_one_row() {
    let board = Board::parse("RRRBGGG BGBGBGB GBGBGBG BGBGBGB GBGBGBG BGBGBGB GBGBGBG").unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].kind, GemKind::Red);
    assert_eq!(matches[1].kind, GemKind::Green);
    assert_eq!(matches[1].positions[0], Position::new(0, 4));
}

#[test]
fn test_l_shape_is_two_records_with_shared_corner() {
    let board = Board::parse("YYYB YGBR YBRG").unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].orientation, Orientation::Horizontal);
    assert_eq!(matches[1].orientation, Orientation::Vertical);
    assert!(matches[0].positions.contains(&Position::new(0, 0)));
    assert!(matches[1].positions.contains(&Position::new(0, 0)));
    assert_eq!(matched_positions(&matches).len(), 5);
}

#[test]
fn test_no_matches_on_checkerboard() {
    let board = Board::parse("RBRB BRBR RBRB BRBR").unwrap();
    assert!(find_matches(&board).is_empty());
}

#[test]
fn test_adjacency() {
    let p = Position::new(3, 3);
    assert!(are_adjacent(p, Position::new(2, 3)));
    assert!(are_adjacent(p, Position::new(3, 4)));
    assert!(!are_adjacent(p, p));
    assert!(!are_adjacent(p, Position::new(4, 4)));
    assert!(!are_adjacent(p, Position::new(3, 5)));
    assert!(!are_adjacent(Position::new(0, 0), Position::new(2, 2)));
}

#[test]
fn test_valid_move_makes_a_match() {
    let board = Board::parse("RBRG GRBY BYGP PGYO").unwrap();
    assert!(find_matches(&board).is_empty());
    let moves = valid_moves(&board);
    assert!(!moves.is_empty());
    assert_eq!(find_valid_move(&board), moves.first().copied());

    for swap in moves {
        let mut scratch = board.clone();
        scratch.swap(swap.a, swap.b);
        assert!(!find_matches(&scratch).is_empty(), "{} <-> {}", swap.a, swap.b);
    }
}

#[test]
fn test_deadlock_detected() {
    let board = Board::parse("RBGY BGYR GYRB YRBG").unwrap();
    assert!(!has_valid_moves(&board));
    assert_eq!(find_valid_move(&board), None);
}
