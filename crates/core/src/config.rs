//! Engine configuration
//!
//! [`BoardConfig`] is validated on construction, so every board the engine
//! builds from it can be generated without matches. The remaining knobs are
//! game balance and have no invalid values.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{
    GemKind, COMBO_STEP, DEFAULT_BOARD_SIZE, DEFAULT_GEM_KINDS, MAX_BOARD_SIZE,
    MAX_SHUFFLE_ATTEMPTS, MIN_BOARD_SIZE, MIN_GEM_KINDS, POINTS_PER_GEM, RUN_BONUS_STEP,
};

/// Board side and the number of gem kinds in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    size: u8,
    kinds: u8,
}

impl BoardConfig {
    /// Validate a board configuration.
    ///
    /// Fewer than 3 kinds or a side below 3 makes a match-free layout
    /// impossible; both are programming errors and are rejected here.
    pub fn new(size: usize, kinds: usize) -> ConfigResult<Self> {
        if size < MIN_BOARD_SIZE as usize || size > MAX_BOARD_SIZE as usize {
            return Err(ConfigError::BoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        if kinds < MIN_GEM_KINDS as usize || kinds > GemKind::ALL.len() {
            return Err(ConfigError::GemKinds {
                kinds,
                min: MIN_GEM_KINDS,
                max: GemKind::ALL.len() as u8,
            });
        }
        Ok(Self {
            size: size as u8,
            kinds: kinds as u8,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn kind_count(&self) -> u8 {
        self.kinds
    }

    /// Kinds that may appear on the board (a prefix of [`GemKind::ALL`]).
    pub fn kind_set(&self) -> &'static [GemKind] {
        &GemKind::ALL[..self.kinds as usize]
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            kinds: DEFAULT_GEM_KINDS,
        }
    }
}

/// Score coefficients. See [`scoring`](crate::scoring) for the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub points_per_gem: u32,
    pub run_bonus_step: u32,
    pub combo_step: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_gem: POINTS_PER_GEM,
            run_bonus_step: RUN_BONUS_STEP,
            combo_step: COMBO_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Permutations tried before regenerating the board from scratch.
    pub max_attempts: u32,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_SHUFFLE_ATTEMPTS,
        }
    }
}

/// Everything a [`CascadeController`](crate::CascadeController) needs besides its random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub scoring: ScoringConfig,
    pub shuffle: ShuffleConfig,
}

impl EngineConfig {
    pub fn new(size: usize, kinds: usize) -> ConfigResult<Self> {
        Ok(Self {
            board: BoardConfig::new(size, kinds)?,
            ..Self::default()
        })
    }
}
