//! Explicit leapfrog update for the 1D wave equation.
//!
//! Second order in time and space. For interior points `1..N-1`:
//! ```text
//! lap[i]    = u[i-1] - 2 u[i] + u[i+1]
//! step 1:     future[i] = current[i] + C² lap[i]
//! step n > 1: future[i] = -past[i] + 2 current[i] + C² lap[i]
//! ```
//! The first step assumes zero initial velocity. Both boundary points
//! are zeroed; a later damping stage, if any, sets their final values.
//!
//! Stable for Courant numbers `C = v dt / dx <= 1`, reported through
//! `max_courant()`.
//!
//! Constructed via the builder pattern: [`Leapfrog::builder`].

use ebb_core::PropagatorError;
use ebb_propagator::context::StepContext;
use ebb_propagator::propagator::Propagator;

/// The leapfrog time-stepping stage.
#[derive(Debug)]
pub struct Leapfrog {
    stability_limit: f64,
}

/// Builder for [`Leapfrog`].
pub struct LeapfrogBuilder {
    stability_limit: f64,
}

impl Leapfrog {
    /// Courant bound of the explicit centred scheme.
    pub const CFL_LIMIT: f64 = 1.0;

    /// Create a new builder for configuring a `Leapfrog` stage.
    pub fn builder() -> LeapfrogBuilder {
        LeapfrogBuilder {
            stability_limit: Self::CFL_LIMIT,
        }
    }

    /// The Courant bound this stage reports to pipeline validation.
    pub fn stability_limit(&self) -> f64 {
        self.stability_limit
    }

    fn check_len(level: &str, actual: usize, expected: usize) -> Result<(), PropagatorError> {
        if actual == expected {
            Ok(())
        } else {
            Err(PropagatorError::InvalidConfiguration {
                reason: format!("{level} buffer has {actual} points, grid has {expected}"),
            })
        }
    }
}

impl LeapfrogBuilder {
    /// Override the reported Courant bound (default: 1.0).
    ///
    /// Raising it lets pipeline validation accept Courant numbers the
    /// scheme is not stable at, which is only useful for studying the
    /// blow-up.
    pub fn stability_limit(mut self, limit: f64) -> Self {
        self.stability_limit = limit;
        self
    }

    /// Build the stage.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `stability_limit` is not finite and > 0.
    pub fn build(self) -> Result<Leapfrog, String> {
        if !(self.stability_limit.is_finite() && self.stability_limit > 0.0) {
            return Err(format!(
                "stability_limit must be finite and > 0, got {}",
                self.stability_limit
            ));
        }
        Ok(Leapfrog {
            stability_limit: self.stability_limit,
        })
    }
}

impl Propagator for Leapfrog {
    fn name(&self) -> &str {
        "leapfrog"
    }

    fn max_courant(&self) -> Option<f64> {
        Some(self.stability_limit)
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = ctx.grid().len();
        let current = ctx.current();
        let past = ctx.past();
        let c2 = ctx.courant() * ctx.courant();

        Self::check_len("current", current.len(), n)?;
        if let Some(past) = past {
            Self::check_len("past", past.len(), n)?;
        }
        let future = ctx.future();
        Self::check_len("future", future.len(), n)?;

        future[0] = 0.0;
        future[n - 1] = 0.0;
        let interior = &mut future[1..n - 1];

        match past {
            None => {
                for (out, w) in interior.iter_mut().zip(current.windows(3)) {
                    *out = w[1] + c2 * (w[0] - 2.0 * w[1] + w[2]);
                }
            }
            Some(past) => {
                for ((out, w), p) in interior
                    .iter_mut()
                    .zip(current.windows(3))
                    .zip(&past[1..n - 1])
                {
                    *out = -p + 2.0 * w[1] + c2 * (w[0] - 2.0 * w[1] + w[2]);
                }
            }
        }
        Ok(())
    }
}
