//! Timed game session.
//!
//! Wraps a [`CascadeController`] with the state the engine leaves to its
//! caller: running score, move count, a countdown driven by an external
//! clock, and the high score to beat. Score deltas are folded in as cascade
//! steps come out of the engine, so a paced driver and an unpaced `resolve`
//! account identically.

use std::path::PathBuf;

use tracing::info;

use crate::core::error::ConfigResult;
use crate::core::{
    CascadeController, EngineConfig, MoveReport, RandomSource, SimpleRng, StepEvent,
    SwapOutcome, TapOutcome,
};
use crate::store::SessionRecord;
use crate::types::{Position, DEFAULT_BOARD_SIZE, DEFAULT_GEM_KINDS, DEFAULT_TIME_LIMIT_SECS};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub time_limit_secs: u32,
    pub board_size: usize,
    pub gem_kinds: usize,
    pub seed: u32,
    /// Leaderboard file; `None` uses the store's default location
    pub store_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            board_size: DEFAULT_BOARD_SIZE as usize,
            gem_kinds: DEFAULT_GEM_KINDS as usize,
            seed: 1,
            store_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from `GEM_CASCADE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let store_path = env::var("GEM_CASCADE_STORE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            time_limit_secs: parsed("GEM_CASCADE_TIME_LIMIT").unwrap_or(defaults.time_limit_secs),
            board_size: parsed("GEM_CASCADE_BOARD_SIZE").unwrap_or(defaults.board_size),
            gem_kinds: parsed("GEM_CASCADE_GEM_KINDS").unwrap_or(defaults.gem_kinds),
            seed: parsed("GEM_CASCADE_SEED").unwrap_or(defaults.seed),
            store_path,
        }
    }

    /// Engine config for this session's board, validated
    pub fn engine_config(&self) -> ConfigResult<EngineConfig> {
        EngineConfig::new(self.board_size, self.gem_kinds)
    }
}

/// One timed game
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = SimpleRng> {
    engine: CascadeController<R>,
    score: u32,
    moves: u32,
    best_combo: u32,
    elapsed_secs: u32,
    time_limit_secs: u32,
    high_score: u32,
}

impl GameSession<SimpleRng> {
    /// Start a seeded session. `high_score` is the best score on record.
    pub fn new(config: &SessionConfig, high_score: u32) -> ConfigResult<Self> {
        let engine = CascadeController::with_seed(config.engine_config()?, config.seed);
        Ok(Self::with_engine(engine, config.time_limit_secs, high_score))
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn with_engine(engine: CascadeController<R>, time_limit_secs: u32, high_score: u32) -> Self {
        Self {
            engine,
            score: 0,
            moves: 0,
            best_combo: 0,
            elapsed_secs: 0,
            time_limit_secs,
            high_score,
        }
    }

    pub fn engine(&self) -> &CascadeController<R> {
        &self.engine
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Deepest cascade seen this session
    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    /// Best of the stored high score and this session's score
    pub fn high_score(&self) -> u32 {
        self.high_score.max(self.score)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.time_limit_secs.saturating_sub(self.elapsed_secs)
    }

    /// Time is up. A move already in flight may still finish resolving.
    pub fn is_over(&self) -> bool {
        self.remaining_secs() == 0
    }

    /// Forward a tap to the engine. `None` once time is up.
    pub fn tap(&mut self, pos: Position) -> Option<TapOutcome> {
        if self.is_over() {
            return None;
        }
        let outcome = self.engine.tap(pos);
        if let TapOutcome::Swap(swap) = outcome {
            self.count_move(swap);
        }
        Some(outcome)
    }

    /// Forward a swap to the engine. `None` once time is up.
    pub fn swap(&mut self, a: Position, b: Position) -> Option<SwapOutcome> {
        if self.is_over() {
            return None;
        }
        let outcome = self.engine.swap(a, b);
        self.count_move(outcome);
        Some(outcome)
    }

    fn count_move(&mut self, outcome: SwapOutcome) {
        if outcome.is_accepted() {
            self.moves = self.moves.saturating_add(1);
        }
    }

    /// Advance the engine one step and fold its score in.
    pub fn step(&mut self) -> Option<StepEvent> {
        let event = self.engine.step()?;
        self.apply(&event);
        Some(event)
    }

    /// Run the current move to completion.
    pub fn resolve(&mut self) -> MoveReport {
        let mut report = MoveReport::default();
        while let Some(event) = self.step() {
            report.record(event);
        }
        report
    }

    fn apply(&mut self, event: &StepEvent) {
        self.score = self.score.saturating_add(event.score());
        if let StepEvent::Settled { combo, .. } = event {
            self.best_combo = self.best_combo.max(*combo);
        }
    }

    /// Advance the countdown by `secs` seconds of wall time.
    pub fn tick(&mut self, secs: u32) {
        if self.is_over() {
            return;
        }
        self.elapsed_secs = self
            .elapsed_secs
            .saturating_add(secs)
            .min(self.time_limit_secs);
        if self.is_over() {
            info!(score = self.score, moves = self.moves, "time up");
        }
    }

    /// Record for the leaderboard
    pub fn finish(&self) -> SessionRecord {
        SessionRecord::new(self.score, self.moves, self.elapsed_secs)
    }

    /// New board and a full clock; the high score carries over.
    pub fn restart(&mut self) {
        self.high_score = self.high_score();
        self.engine.restart();
        self.score = 0;
        self.moves = 0;
        self.best_combo = 0;
        self.elapsed_secs = 0;
    }
}
