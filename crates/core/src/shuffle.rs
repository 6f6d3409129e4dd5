//! Deadlock recovery
//!
//! A shuffle permutes the gems already on the board, so ids and per-kind
//! counts are unchanged. Permutations are retried until the board has no
//! match and at least one legal move. If the attempt budget runs out the
//! board is regenerated from scratch instead (new gems, new ids), repeating
//! until a live layout comes up.

use serde::Serialize;
use tracing::{debug, warn};

use crate::board::Board;
use crate::config::ShuffleConfig;
use crate::matcher::has_any_match;
use crate::moves::has_valid_moves;
use crate::rng::RandomSource;
use crate::types::Gem;

/// How a deadlocked board was recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShuffleOutcome {
    /// Existing gems were permuted; `attempts` permutations were tried.
    Shuffled { attempts: u32 },
    /// All permutations failed; the board was regenerated `attempts` times.
    Regenerated { attempts: u32 },
}

fn is_live(board: &Board) -> bool {
    !has_any_match(board) && has_valid_moves(board)
}

/// Rearrange a full board until it is match-free and has a legal move.
///
/// Only a full board can be permuted. A board with empty cells goes straight
/// to regeneration.
pub fn shuffle_board<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    config: &ShuffleConfig,
) -> ShuffleOutcome {
    if !board.is_full() {
        warn!("shuffle requested on a board with empty cells, regenerating");
        return regenerate_live(board, rng);
    }
    let mut gems: Vec<Gem> = board.gems().collect();

    for attempt in 1..=config.max_attempts {
        rng.shuffle(&mut gems);
        board.fill_from(&gems);
        if is_live(board) {
            debug!(attempts = attempt, "board shuffled");
            return ShuffleOutcome::Shuffled { attempts: attempt };
        }
    }

    warn!(
        max_attempts = config.max_attempts,
        "no live permutation found, regenerating board"
    );
    regenerate_live(board, rng)
}

fn regenerate_live<R: RandomSource>(board: &mut Board, rng: &mut R) -> ShuffleOutcome {
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        board.regenerate(rng);
        if has_valid_moves(board) {
            debug!(attempts, "board regenerated");
            return ShuffleOutcome::Regenerated { attempts };
        }
    }
}
