//! Tracing pad for the handwriting game.
//!
//! There is no wrong answer here: a round completes the first time the pen is
//! lifted after putting any ink down.

use serde::{Deserialize, Serialize};

use crate::games::round::settle_correct;
use crate::games::types::{Outcome, Round};

/// Pen state for the current tracing round
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TracePad {
    pen_down: bool,
    inked: bool,
}

impl TracePad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on the canvas
    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Pointer moved; ink is only applied while the pen is down
    pub fn pen_move(&mut self) {
        if self.pen_down {
            self.inked = true;
        }
    }

    /// Pointer released or left the canvas. Completes the round if ink has
    /// been applied; returns `None` when there is nothing to report.
    pub fn pen_up(&mut self, round: &mut Round) -> Option<Outcome> {
        let was_down = std::mem::replace(&mut self.pen_down, false);
        if !was_down || !self.inked {
            return None;
        }
        if round.locked {
            return Some(Outcome::Ignored);
        }

        let outcome = settle_correct(round);
        tracing::info!(
            round_id = %round.round_id,
            glyph = %round.target.id,
            "Trace completed"
        );
        Some(outcome)
    }

    /// Wipe the canvas. The round itself is untouched.
    pub fn clear(&mut self) {
        self.inked = false;
        self.pen_down = false;
    }

    pub fn is_inked(&self) -> bool {
        self.inked
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }
}
