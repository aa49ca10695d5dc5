//! The [`Propagator`] trait.
//!
//! Propagators are stateless operators executed in sequence each step.
//! Their parameters are fixed at construction; everything that changes
//! from step to step arrives through the [`StepContext`].

use crate::context::StepContext;
use ebb_core::PropagatorError;

/// One stage of the solver's per-step pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same inputs produce identical outputs.
/// - `&self`: propagators hold only immutable parameters.
/// - `max_courant()` is called once at startup, not per step.
///
/// # Object safety
///
/// This trait is object-safe; the solver stores stages as
/// `Box<dyn Propagator>`.
///
/// # Examples
///
/// A stage that pins both ends of the future field to zero:
///
/// ```
/// use ebb_propagator::{Propagator, StepContext};
/// use ebb_core::PropagatorError;
///
/// struct PinEnds;
///
/// impl Propagator for PinEnds {
///     fn name(&self) -> &str { "pin_ends" }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
///         let future = ctx.future();
///         let last = future.len() - 1;
///         future[0] = 0.0;
///         future[last] = 0.0;
///         Ok(())
///     }
/// }
///
/// assert_eq!(PinEnds.name(), "pin_ends");
/// assert_eq!(PinEnds.max_courant(), None);
/// ```
pub trait Propagator: Send + 'static {
    /// Human-readable name for error reporting and metrics.
    ///
    /// Names must be unique within a pipeline.
    fn name(&self) -> &str;

    /// Largest Courant number `v * dt / dx` this stage stays stable at.
    ///
    /// The pipeline validates `courant <= min(max_courant)` across all
    /// stages. Return `None` to impose no constraint.
    fn max_courant(&self) -> Option<f64> {
        None
    }

    /// Execute the stage for one step.
    ///
    /// Called once per step in pipeline order. Earlier stages' writes to
    /// the future buffer are visible through [`StepContext::future`].
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError>;
}
