//! Board tests - grid access, generation, gravity and shuffling

use gem_cascade::core::error::ConfigError;
use gem_cascade::core::{
    apply_gravity, find_matches, has_any_match, has_valid_moves, remove_matches, shuffle_board,
    Board, BoardConfig, ShuffleConfig, ShuffleOutcome, SimpleRng,
};
use gem_cascade::types::{Gem, GemKind, Position, DEFAULT_BOARD_SIZE};

#[test]
fn test_board_get_and_set() {
    let mut board = Board::parse("RBG BGR GRB").unwrap();
    let pos = Position::new(1, 1);

    assert_eq!(board.kind_at(pos), Some(GemKind::Green));
    assert!(board.set(pos, Some(Gem::new(99, GemKind::Orange))));
    assert_eq!(board.get(pos), Some(Some(Gem::new(99, GemKind::Orange))));

    assert!(board.set(pos, None));
    assert_eq!(board.get(pos), Some(None));
    assert!(!board.is_full());
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::parse("RBG BGR GRB").unwrap();
    let outside = Position::new(0, 3);

    assert!(!board.contains(outside));
    assert_eq!(board.get(outside), None);
    assert!(!board.set(outside, None));
    assert!(!board.swap(Position::new(0, 0), outside));
    assert_eq!(board.to_string(), "RBG\nBGR\nGRB\n");
}

#[test]
fn test_parse_rejects_bad_layouts() {
    assert!(matches!(
        Board::parse("RB BG"),
        Err(ConfigError::BoardSize { size: 2, .. })
    ));
    assert!(matches!(
        Board::parse("RBG BG GRB"),
        Err(ConfigError::NotSquare { row: 1, len: 2, expected: 3 })
    ));
    assert!(matches!(
        Board::parse("RBG BXR GRB"),
        Err(ConfigError::UnknownSymbol { symbol: 'X', row: 1, col: 1 })
    ));
}

#[test]
fn test_generated_boards_are_full_and_match_free() {
    for seed in 1..50 {
        let board = Board::generate(&BoardConfig::default(), &mut SimpleRng::new(seed));
        assert_eq!(board.size(), DEFAULT_BOARD_SIZE);
        assert!(board.is_full());
        assert!(!has_any_match(&board), "seed {} produced a match:\n{}", seed, board);
    }
}

#[test]
fn test_generation_respects_kind_count() {
    let config = BoardConfig::new(10, 3).unwrap();
    let board = Board::generate(&config, &mut SimpleRng::new(77));
    assert!(board.gems().all(|g| config.kind_set().contains(&g.kind)));
    assert!(!has_any_match(&board));
}

#[test]
fn test_generation_is_deterministic() {
    let config = BoardConfig::default();
    let a = Board::generate(&config, &mut SimpleRng::new(2024));
    let b = Board::generate(&config, &mut SimpleRng::new(2024));
    let c = Board::generate(&config, &mut SimpleRng::new(2025));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_generated_ids_are_unique() {
    let board = Board::generate(&BoardConfig::default(), &mut SimpleRng::new(5));
    let mut ids: Vec<u32> = board.gems().map(|g| g.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 64);
}

#[test]
fn test_gravity_fills_every_cell_after_removal() {
    // Row 0 and column 0 both match; the corner is removed once.
    let mut board = Board::parse("RRRB RGBY RBYG GYBO").unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 2);

    let removed = remove_matches(&mut board, &matches);
    assert_eq!(removed.len(), 5);

    let report = apply_gravity(&mut board, &mut SimpleRng::new(3));
    assert!(board.is_full());
    assert_eq!(report.spawned.len(), 5);
}

#[test]
fn test_shuffle_recovers_deadlocked_board() {
    let mut board = Board::parse("RBGY BGYR GYRB YRBG").unwrap();
    assert!(!has_any_match(&board));
    assert!(!has_valid_moves(&board));
    let counts = board.kind_counts();

    let outcome = shuffle_board(&mut board, &mut SimpleRng::new(42), &ShuffleConfig::default());
    assert!(matches!(outcome, ShuffleOutcome::Shuffled { .. }));
    assert_eq!(board.kind_counts(), counts);
    assert!(!has_any_match(&board));
    assert!(has_valid_moves(&board));
}
