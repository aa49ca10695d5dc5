//! Execution context passed to propagators during a step.
//!
//! [`StepContext`] splits the triple buffer into two read-only time levels
//! and one writable level, next to the grid and the step's scalars.

use ebb_core::StepIndex;
use ebb_space::SpatialGrid;

/// Execution context passed to each propagator's `step()` method.
///
/// # Split-borrow semantics
///
/// - **`past()`** and **`current()`** are the two published time levels.
///   They hand out slices with the context's full lifetime, so a stage
///   can hold them while writing.
///
/// - **`future()`** is the exclusive scratch level. It holds stale data
///   from an earlier step until the first stage overwrites it; later
///   stages see what earlier stages wrote.
pub struct StepContext<'a> {
    past: Option<&'a [f64]>,
    current: &'a [f64],
    future: &'a mut [f64],
    grid: &'a SpatialGrid,
    step: StepIndex,
    courant: f64,
    dt: f64,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the solver, not by propagators directly.
    /// `step` is the index of the time level being produced.
    pub fn new(
        past: Option<&'a [f64]>,
        current: &'a [f64],
        future: &'a mut [f64],
        grid: &'a SpatialGrid,
        step: StepIndex,
        courant: f64,
        dt: f64,
    ) -> Self {
        Self {
            past,
            current,
            future,
            grid,
            step,
            courant,
            dt,
        }
    }

    /// The time level before `current`, or `None` when producing step 1.
    pub fn past(&self) -> Option<&'a [f64]> {
        self.past
    }

    /// The most recently published time level.
    pub fn current(&self) -> &'a [f64] {
        self.current
    }

    /// The time level being produced.
    pub fn future(&mut self) -> &mut [f64] {
        self.future
    }

    /// Read-only view of the future level as written so far.
    pub fn future_view(&self) -> &[f64] {
        self.future
    }

    /// Spatial grid shared by all three levels.
    pub fn grid(&self) -> &'a SpatialGrid {
        self.grid
    }

    /// Index of the time level being produced.
    pub fn step(&self) -> StepIndex {
        self.step
    }

    /// Courant number `v * dt / dx`.
    pub fn courant(&self) -> f64 {
        self.courant
    }

    /// Configured time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}
