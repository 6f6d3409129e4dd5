//! Scoring module - run length and combo scoring
//!
//! - Each match scores `len * points_per_gem * (1 + (len - 3) * run_bonus_step)`,
//!   so longer runs are worth more per gem.
//! - The sum over one cascade step is multiplied by `1 + level * combo_step`,
//!   where `level` is the 0-based cascade step within the move.
//! - Crossing (L/T) runs are scored as the separate runs they are; there is
//!   no extra shape bonus.

use serde::Serialize;

use crate::config::ScoringConfig;
use crate::matcher::Match;
use crate::types::MIN_MATCH_LEN;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreResult {
    /// Sum of run scores before the combo multiplier.
    pub base: u32,
    pub combo_multiplier: u32,
    pub total: u32,
}

/// Points for a single run of `len` gems
pub fn run_score(len: usize, config: &ScoringConfig) -> u32 {
    if len < MIN_MATCH_LEN {
        return 0;
    }
    let len = len as u32;
    let extra = len - MIN_MATCH_LEN as u32;
    let per_gem_multiplier = 1 + extra.saturating_mul(config.run_bonus_step);
    len.saturating_mul(config.points_per_gem)
        .saturating_mul(per_gem_multiplier)
}

/// Multiplier applied at cascade level `level` (level 0 = x1)
pub fn combo_multiplier(level: u32, config: &ScoringConfig) -> u32 {
    1u32.saturating_add(level.saturating_mul(config.combo_step))
}

/// Score all matches of one cascade step.
pub fn calculate_score(matches: &[Match], level: u32, config: &ScoringConfig) -> ScoreResult {
    let base = matches
        .iter()
        .map(|m| run_score(m.len(), config))
        .fold(0u32, u32::saturating_add);
    let combo_multiplier = combo_multiplier(level, config);

    ScoreResult {
        base,
        combo_multiplier,
        total: base.saturating_mul(combo_multiplier),
    }
}
