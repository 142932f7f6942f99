/// Countdown timer state (rendering-agnostic)
///
/// A whole-second counter decremented once per tick by the event loop.
/// Reaching zero is what forces a puzzle round into the time-expired state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    /// Seconds left on the clock
    remaining: u32,

    /// Length the countdown was last started with (used for the bar)
    limit: u32,
}

impl CountdownState {
    /// Create an idle countdown
    pub fn new() -> Self {
        Self {
            remaining: 0,
            limit: 0,
        }
    }

    /// Start (or restart) the countdown at `seconds`
    pub fn start(&mut self, seconds: u32) {
        self.limit = seconds;
        self.remaining = seconds;
    }

    /// Advance one second
    ///
    /// Returns true exactly once: on the tick that brings the clock to zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Get remaining seconds
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    /// Seconds used since the last `start`
    pub fn elapsed_seconds(&self) -> u32 {
        self.limit.saturating_sub(self.remaining)
    }

    /// Check if countdown is active
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Started and ran all the way down
    pub fn is_expired(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }

    /// Clear countdown
    pub fn clear(&mut self) {
        self.remaining = 0;
        self.limit = 0;
    }

    /// Share of the limit still left, 0.0..=1.0
    pub fn fraction_remaining(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.remaining as f64 / self.limit as f64
        }
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown() {
        let mut cd = CountdownState::new();
        assert!(!cd.is_active());
        assert!(!cd.is_expired());

        cd.start(3);
        assert!(cd.is_active());
        assert_eq!(cd.remaining_seconds(), 3);

        assert!(!cd.tick());
        assert!(!cd.tick());
        assert!(cd.tick());
        assert!(cd.is_expired());
        assert_eq!(cd.elapsed_seconds(), 3);

        // further ticks saturate and don't report expiry again
        assert!(!cd.tick());
        assert_eq!(cd.remaining_seconds(), 0);

        cd.clear();
        assert!(!cd.is_active());
        assert!(!cd.is_expired());
    }

    #[test]
    fn test_fraction_remaining() {
        let mut cd = CountdownState::new();
        assert_eq!(cd.fraction_remaining(), 0.0);
        cd.start(4);
        cd.tick();
        assert!((cd.fraction_remaining() - 0.75).abs() < f64::EPSILON);
    }
}
