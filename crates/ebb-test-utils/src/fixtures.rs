//! Reusable propagator test fixtures.
//!
//! Three pipeline stages for validation and solver testing:
//!
//! - [`ConstPropagator`]: fills the future field with a constant.
//! - [`ScalePropagator`]: multiplies the future field by a factor.
//! - [`FailingPropagator`]: fails deterministically after N calls.

use ebb_core::PropagatorError;
use ebb_propagator::context::StepContext;
use ebb_propagator::propagator::Propagator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Writes a constant value to every point of the future field.
pub struct ConstPropagator {
    pub name: String,
    pub value: f64,
}

impl ConstPropagator {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Propagator for ConstPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        ctx.future().fill(self.value);
        Ok(())
    }
}

/// Multiplies the future field by `factor`.
///
/// Placed after the leapfrog stage, a factor above 1 forces growth
/// without needing an unstable Courant number.
pub struct ScalePropagator {
    pub name: String,
    pub factor: f64,
}

impl ScalePropagator {
    pub fn new(name: impl Into<String>, factor: f64) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }
}

impl Propagator for ScalePropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        for v in ctx.future() {
            *v *= self.factor;
        }
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Useful for testing rollback and error propagation in the solver.
/// Uses `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingPropagator {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingPropagator {
    /// Create a stage that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }
}

impl Propagator for FailingPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            // Scribble first so a missing rollback would be visible.
            ctx.future().fill(f64::NAN);
            return Err(PropagatorError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_grid;
    use ebb_core::StepIndex;

    fn with_ctx(f: impl FnOnce(&mut StepContext<'_>)) -> Vec<f64> {
        let grid = reference_grid();
        let current = vec![0.0; grid.len()];
        let mut future = vec![2.0; grid.len()];
        let mut ctx = StepContext::new(
            None,
            &current,
            &mut future,
            &grid,
            StepIndex(1),
            0.5,
            0.005,
        );
        f(&mut ctx);
        future
    }

    #[test]
    fn const_fills_future() {
        let out = with_ctx(|ctx| ConstPropagator::new("c", 3.0).step(ctx).unwrap());
        assert!(out.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn scale_multiplies_future() {
        let out = with_ctx(|ctx| ScalePropagator::new("s", 1.5).step(ctx).unwrap());
        assert!(out.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn failing_fails_after_quota() {
        let prop = FailingPropagator::new("f", 1);
        let out = with_ctx(|ctx| {
            assert!(prop.step(ctx).is_ok());
            assert!(prop.step(ctx).is_err());
            assert!(prop.step(ctx).is_err());
        });
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
