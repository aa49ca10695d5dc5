//! Strongly-typed step counter.

use std::fmt;

/// Number of time steps elapsed since initialization.
///
/// Step 0 is the initial condition, step 1 is produced by the
/// zero-velocity first-step rule, and every later step by the general
/// leapfrog update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepIndex(pub u64);

impl StepIndex {
    /// The initial-condition time level.
    pub const ZERO: Self = Self(0);

    /// The index after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Simulated time `n * dt` at this step.
    pub fn time(self, dt: f64) -> f64 {
        self.0 as f64 * dt
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
