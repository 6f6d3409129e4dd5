//! Paced move driver.
//!
//! The engine never waits; presentation pauses belong to the caller. This
//! driver steps a [`GameSession`] through one move and sleeps between steps
//! so a renderer can show each phase:
//!
//! | After | Pause | Default |
//! |-------|-------|---------|
//! | swap accepted | `match_delay` (highlight) | 300 ms |
//! | cascade step | `clear_delay` + `cascade_delay` | 100 + 400 ms |
//! | swap without match | `revert_delay` | 300 ms |

use std::time::Duration;

use tracing::trace;

use crate::core::{MoveReport, Phase, RandomSource, StepEvent};
use crate::session::GameSession;

pub const MATCH_DELAY_MS: u64 = 300;
pub const CLEAR_DELAY_MS: u64 = 100;
pub const CASCADE_DELAY_MS: u64 = 400;
pub const REVERT_DELAY_MS: u64 = 300;

/// Pauses inserted between engine steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub match_delay: Duration,
    pub clear_delay: Duration,
    pub cascade_delay: Duration,
    pub revert_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            match_delay: Duration::from_millis(MATCH_DELAY_MS),
            clear_delay: Duration::from_millis(CLEAR_DELAY_MS),
            cascade_delay: Duration::from_millis(CASCADE_DELAY_MS),
            revert_delay: Duration::from_millis(REVERT_DELAY_MS),
        }
    }
}

impl Pacing {
    /// No pauses at all
    pub fn none() -> Self {
        Self {
            match_delay: Duration::ZERO,
            clear_delay: Duration::ZERO,
            cascade_delay: Duration::ZERO,
            revert_delay: Duration::ZERO,
        }
    }

    /// Every default pause scaled by `percent` / 100
    pub fn scaled(percent: u32) -> Self {
        let d = Self::default();
        Self {
            match_delay: d.match_delay * percent / 100,
            clear_delay: d.clear_delay * percent / 100,
            cascade_delay: d.cascade_delay * percent / 100,
            revert_delay: d.revert_delay * percent / 100,
        }
    }

    /// Pause before the first step of a move
    fn opening(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Reverting { .. } => self.revert_delay,
            Phase::Resolving { .. } => self.match_delay,
            _ => Duration::ZERO,
        }
    }

    /// Pause before the step that follows `event`
    fn after(&self, event: &StepEvent) -> Duration {
        match event {
            StepEvent::Cascade(step) if step.continues => self.clear_delay + self.cascade_delay,
            StepEvent::Cascade(_) => self.clear_delay,
            _ => Duration::ZERO,
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Step the move in flight to completion, pausing between steps.
///
/// `observer` sees each event after it has been applied, with the session
/// in its post-step state. Returns immediately if no move is in flight.
pub async fn drive_move<R, F>(
    session: &mut GameSession<R>,
    pacing: &Pacing,
    mut observer: F,
) -> MoveReport
where
    R: RandomSource,
    F: FnMut(&GameSession<R>, &StepEvent),
{
    let mut report = MoveReport::default();
    let mut delay = pacing.opening(session.engine().phase());

    loop {
        pause(delay).await;
        let Some(event) = session.step() else {
            break;
        };
        trace!(?event, "step");
        observer(session, &event);
        delay = pacing.after(&event);
        report.record(event);
    }
    report
}
