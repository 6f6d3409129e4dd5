//! Cascade controller - the per-move state machine
//!
//! This module ties together all engine components: board, matcher, gravity,
//! scoring, move checking and shuffling. It owns the board for one game and
//! sequences a player move as discrete steps:
//!
//! ```text
//! Idle --tap P--> AwaitingSecondSelection(P)
//!   tap P again           -> Idle
//!   tap Q not adjacent    -> AwaitingSecondSelection(Q)
//!   tap Q adjacent        -> swap(P, Q)
//! swap, no match          -> Reverting   --step--> Idle (swapped back)
//! swap, match             -> Resolving(0)
//! Resolving(n) --step-->  Resolving(n + 1)   if the refill left new matches
//!                         Settling           otherwise
//! Settling --step-->      Idle (reshuffled if no legal move remains)
//! ```
//!
//! Swap validation happens synchronously inside [`CascadeController::swap`],
//! so there is no observable validating phase. While reverting, resolving or
//! settling the controller is busy and ignores taps and swaps; the caller is
//! free to pause between [`step`](CascadeController::step) calls for animation.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::gravity::{apply_gravity, remove_matches, GravityReport};
use crate::matcher::{find_matches, has_any_match, Match};
use crate::moves::{are_adjacent, has_valid_moves};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{calculate_score, ScoreResult};
use crate::shuffle::{shuffle_board, ShuffleOutcome};
use crate::snapshot::BoardSnapshot;
use crate::types::{Position, Swap};

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    AwaitingSecondSelection { selected: Position },
    /// A swap without matches is on the board and will be undone by the next step.
    Reverting { swap: Swap },
    /// Current matches will be scored at combo `level`.
    Resolving { level: u32 },
    /// Cascade finished after `combo` steps; deadlock check pending.
    Settling { combo: u32 },
}

impl Phase {
    /// True while a move is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Reverting { .. } | Phase::Resolving { .. } | Phase::Settling { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A move is still being reverted or resolved.
    Busy,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    OutOfBounds,
    NotAdjacent,
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Selected(Position),
    Deselected,
    /// The tap was not adjacent to the selection and replaced it.
    Reselected(Position),
    Swap(SwapOutcome),
    Ignored(IgnoreReason),
}

/// Result of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap produced `matches` matches; a move was made.
    Accepted { matches: usize },
    /// No match; the next step swaps back. Not a move, scores nothing.
    Reverting,
    /// Invalid pair; nothing changed.
    Rejected(RejectReason),
    Ignored(IgnoreReason),
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted { .. })
    }
}

/// One resolved cascade level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    pub level: u32,
    pub matches: Vec<Match>,
    /// Cleared positions (union of all matches), for match animation.
    pub removed: Vec<Position>,
    pub score: ScoreResult,
    pub gravity: GravityReport,
    /// True if the refill produced further matches.
    pub continues: bool,
}

/// Output of one [`CascadeController::step`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    Reverted {
        swap: Swap,
    },
    Cascade(CascadeStep),
    Settled {
        combo: u32,
        reshuffle: Option<ShuffleOutcome>,
    },
}

impl StepEvent {
    /// Points earned by this step
    pub fn score(&self) -> u32 {
        match self {
            StepEvent::Cascade(step) => step.score.total,
            _ => 0,
        }
    }

    /// True if this step reshuffled a deadlocked board
    pub fn reshuffled(&self) -> bool {
        matches!(
            self,
            StepEvent::Settled {
                reshuffle: Some(_),
                ..
            }
        )
    }
}

/// Everything that happened while a move was driven to completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub events: Vec<StepEvent>,
    pub total_score: u32,
    /// Number of cascade steps (0 for a reverted swap)
    pub combo: u32,
    pub reshuffled: bool,
}

impl MoveReport {
    /// Fold one step's event into the report
    pub fn record(&mut self, event: StepEvent) {
        self.total_score = self.total_score.saturating_add(event.score());
        if let StepEvent::Settled { combo, .. } = event {
            self.combo = combo;
        }
        self.reshuffled |= event.reshuffled();
        self.events.push(event);
    }
}

/// Owns one game's board and drives moves through their cascades.
#[derive(Debug, Clone)]
pub struct CascadeController<R: RandomSource = SimpleRng> {
    config: EngineConfig,
    board: Board,
    rng: R,
    phase: Phase,
}

impl CascadeController<SimpleRng> {
    /// Create a controller driven by a seeded [`SimpleRng`]
    pub fn with_seed(config: EngineConfig, seed: u32) -> Self {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> CascadeController<R> {
    /// Create a controller with a freshly generated, playable board
    pub fn new(config: EngineConfig, mut rng: R) -> Self {
        let board = Board::generate(&config.board, &mut rng);
        let mut controller = Self {
            config,
            board,
            rng,
            phase: Phase::Idle,
        };
        controller.ensure_playable();
        controller
    }

    /// Create a controller around an existing board (e.g. a saved or scripted layout).
    ///
    /// The board is used as-is; its own board config replaces `config.board`.
    pub fn from_board(mut config: EngineConfig, board: Board, rng: R) -> Self {
        config.board = board.config();
        Self {
            config,
            board,
            rng,
            phase: Phase::Idle,
        }
    }

    /// Start a new game, discarding any move in flight.
    pub fn reset(&mut self, config: EngineConfig, rng: R) {
        if self.phase.is_busy() {
            info!(phase = ?self.phase, "reset aborted a move in flight");
        }
        *self = Self::new(config, rng);
        info!(size = self.board.size(), "new game");
    }

    /// Start a new game with the same config, continuing the random sequence.
    pub fn restart(&mut self) {
        if self.phase.is_busy() {
            info!(phase = ?self.phase, "restart aborted a move in flight");
        }
        self.board = Board::generate(&self.config.board, &mut self.rng);
        self.phase = Phase::Idle;
        self.ensure_playable();
        info!(size = self.board.size(), "new game");
    }

    /// Replace the board with `board` and go idle, aborting any move in flight.
    pub fn reset_with(&mut self, board: Board) {
        if self.phase.is_busy() {
            info!(phase = ?self.phase, "reset aborted a move in flight");
        }
        self.config.board = board.config();
        self.board = board;
        self.phase = Phase::Idle;
    }

    fn ensure_playable(&mut self) {
        if !has_valid_moves(&self.board) {
            let outcome = shuffle_board(&mut self.board, &mut self.rng, &self.config.shuffle);
            debug!(?outcome, "initial board had no moves");
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a move is being reverted or resolved
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn selected(&self) -> Option<Position> {
        match self.phase {
            Phase::AwaitingSecondSelection { selected } => Some(selected),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(&self.board, self.phase)
    }

    /// Handle a tap on `pos`
    pub fn tap(&mut self, pos: Position) -> TapOutcome {
        if self.phase.is_busy() {
            trace!(%pos, "tap ignored while busy");
            return TapOutcome::Ignored(IgnoreReason::Busy);
        }
        if !self.board.contains(pos) {
            trace!(%pos, "tap out of bounds");
            return TapOutcome::Ignored(IgnoreReason::OutOfBounds);
        }

        match self.phase {
            Phase::AwaitingSecondSelection { selected } if selected == pos => {
                self.phase = Phase::Idle;
                TapOutcome::Deselected
            }
            Phase::AwaitingSecondSelection { selected } if are_adjacent(selected, pos) => {
                TapOutcome::Swap(self.swap(selected, pos))
            }
            Phase::AwaitingSecondSelection { .. } => {
                self.phase = Phase::AwaitingSecondSelection { selected: pos };
                TapOutcome::Reselected(pos)
            }
            _ => {
                self.phase = Phase::AwaitingSecondSelection { selected: pos };
                TapOutcome::Selected(pos)
            }
        }
    }

    /// Try to exchange the gems at `a` and `b`.
    ///
    /// Invalid pairs are rejected without touching the board. A valid swap
    /// clears any selection and either starts resolving or, if it made no
    /// match, waits for one step to be swapped back.
    pub fn swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        if self.phase.is_busy() {
            trace!(%a, %b, "swap ignored while busy");
            return SwapOutcome::Ignored(IgnoreReason::Busy);
        }
        if !self.board.contains(a) || !self.board.contains(b) {
            return SwapOutcome::Rejected(RejectReason::OutOfBounds);
        }
        if !are_adjacent(a, b) {
            return SwapOutcome::Rejected(RejectReason::NotAdjacent);
        }

        self.board.swap(a, b);
        let matches = find_matches(&self.board).len();
        if matches == 0 {
            debug!(%a, %b, "swap made no match, reverting");
            self.phase = Phase::Reverting {
                swap: Swap::new(a, b),
            };
            return SwapOutcome::Reverting;
        }

        debug!(%a, %b, matches, "swap accepted");
        self.phase = Phase::Resolving { level: 0 };
        SwapOutcome::Accepted { matches }
    }

    /// Advance the current move by one discrete step. Returns `None` when idle.
    pub fn step(&mut self) -> Option<StepEvent> {
        match self.phase {
            Phase::Idle | Phase::AwaitingSecondSelection { .. } => None,
            Phase::Reverting { swap } => {
                self.board.swap(swap.a, swap.b);
                self.phase = Phase::Idle;
                Some(StepEvent::Reverted { swap })
            }
            Phase::Resolving { level } => Some(self.resolve_level(level)),
            Phase::Settling { combo } => Some(self.settle(combo)),
        }
    }

    fn resolve_level(&mut self, level: u32) -> StepEvent {
        let matches = find_matches(&self.board);
        let score = calculate_score(&matches, level, &self.config.scoring);
        let removed = remove_matches(&mut self.board, &matches);
        let gravity = apply_gravity(&mut self.board, &mut self.rng);
        let continues = has_any_match(&self.board);

        self.phase = match (continues, matches.is_empty()) {
            (true, _) => Phase::Resolving { level: level + 1 },
            (false, false) => Phase::Settling { combo: level + 1 },
            (false, true) => Phase::Settling { combo: level },
        };
        debug!(
            level,
            removed = removed.len(),
            points = score.total,
            continues,
            "cascade step"
        );

        StepEvent::Cascade(CascadeStep {
            level,
            matches,
            removed,
            score,
            gravity,
            continues,
        })
    }

    fn settle(&mut self, combo: u32) -> StepEvent {
        let reshuffle = if has_valid_moves(&self.board) {
            None
        } else {
            info!("no moves left, reshuffling");
            Some(shuffle_board(
                &mut self.board,
                &mut self.rng,
                &self.config.shuffle,
            ))
        };
        self.phase = Phase::Idle;
        StepEvent::Settled { combo, reshuffle }
    }

    /// Step until idle, collecting every event.
    pub fn resolve(&mut self) -> MoveReport {
        let mut report = MoveReport::default();
        while let Some(event) = self.step() {
            report.record(event);
        }
        report
    }

    /// Swap and drive the move to completion without pauses.
    pub fn play(&mut self, a: Position, b: Position) -> (SwapOutcome, MoveReport) {
        let outcome = self.swap(a, b);
        let report = match outcome {
            SwapOutcome::Accepted { .. } | SwapOutcome::Reverting => self.resolve(),
            _ => MoveReport::default(),
        };
        (outcome, report)
    }
}
