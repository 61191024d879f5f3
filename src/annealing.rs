//! Annealing schedule: a linear cool-down that ends in a frozen layout

use tracing::debug;

/// Maps elapsed simulation time to a velocity multiplier in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingScheduler {
    duration: f32,
    /// Largest elapsed time observed so far
    elapsed: f32,
    frozen: bool,
}

impl AnnealingScheduler {
    /// `duration` must be non-negative; infinity means "never freeze"
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            frozen: false,
        }
    }

    /// `max(0, 1 - elapsed / duration)`, with zero duration already cold
    pub fn factor_at(duration: f32, elapsed: f32) -> f32 {
        if elapsed >= duration {
            return 0.0;
        }
        (1.0 - elapsed.max(0.0) / duration).clamp(0.0, 1.0)
    }

    /// Record the clock and return the factor for this frame
    ///
    /// Time never runs backwards here: a smaller (or NaN) `elapsed` than one
    /// already seen is ignored. Once frozen the scheduler stays frozen.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        self.elapsed = self.elapsed.max(elapsed);
        if self.frozen {
            return 0.0;
        }

        let factor = Self::factor_at(self.duration, self.elapsed);
        if factor <= 0.0 {
            self.frozen = true;
            debug!(elapsed = self.elapsed, "layout frozen");
        }
        factor
    }

    /// Factor at the latest observed time, without advancing
    pub fn factor(&self) -> f32 {
        if self.frozen {
            0.0
        } else {
            Self::factor_at(self.duration, self.elapsed)
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
