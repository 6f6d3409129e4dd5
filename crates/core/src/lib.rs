//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: board generation, match detection,
//! removal and refill, scoring, deadlock detection, reshuffling, and the
//! cascade controller that sequences them for one player move.
//! It has **no dependencies** on rendering, input devices, timers, or storage:
//!
//! - **Deterministic**: every random choice goes through an injected [`RandomSource`]
//! - **Caller-owned**: no globals; a [`CascadeController`] is a plain value
//! - **Step-driven**: cascades advance one discrete step per [`CascadeController::step`],
//!   so the caller decides where to pause for animation
//!
//! # Module Structure
//!
//! - [`board`]: square grid of gems with id allocation
//! - [`factory`]: match-free board generation
//! - [`matcher`]: maximal run detection in rows and columns
//! - [`gravity`]: match removal, column compaction and refill
//! - [`scoring`]: run-length and combo scoring
//! - [`moves`]: adjacency and exhaustive move availability
//! - [`shuffle`]: deadlock recovery preserving gem counts
//! - [`cascade`]: the swap / resolve / settle state machine
//! - [`snapshot`]: serialisable view of the controller for renderers
//!
//! # Example
//!
//! ```
//! use gem_cascade_core::{CascadeController, EngineConfig, find_valid_move, SwapOutcome};
//!
//! let mut engine = CascadeController::with_seed(EngineConfig::default(), 7);
//! let swap = find_valid_move(engine.board()).expect("fresh boards always have a move");
//!
//! assert!(matches!(engine.swap(swap.a, swap.b), SwapOutcome::Accepted { .. }));
//! let report = engine.resolve();
//! assert!(report.total_score > 0);
//! assert!(!engine.is_busy());
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod error;
pub mod factory;
pub mod gravity;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod shuffle;
pub mod snapshot;

pub use gem_cascade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{
    CascadeController, CascadeStep, IgnoreReason, MoveReport, Phase, RejectReason, StepEvent,
    SwapOutcome, TapOutcome,
};
pub use config::{BoardConfig, EngineConfig, ScoringConfig, ShuffleConfig};
pub use error::ConfigError;
pub use gravity::{apply_gravity, remove_matches, Fall, GravityReport};
pub use matcher::{find_matches, has_any_match, matched_positions, Match};
pub use moves::{are_adjacent, find_valid_move, has_valid_moves, neighbours, valid_moves};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use shuffle::{shuffle_board, ShuffleOutcome};
pub use snapshot::BoardSnapshot;
