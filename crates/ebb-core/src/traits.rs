//! Read-only snapshot access for presentation drivers.

use crate::id::StepIndex;

/// Read-only access to the field at one time level.
///
/// This is the only surface a rendering loop sees. It carries no
/// rendering types; drivers copy what they need before asking the
/// solver for the next step.
pub trait SnapshotAccess {
    /// Displacement at every grid point, in grid order.
    fn field(&self) -> &[f64];

    /// The step at which this field was produced.
    fn step(&self) -> StepIndex;

    /// Simulated time of this field (`step * dt`).
    fn time(&self) -> f64;

    /// Largest absolute displacement in the field.
    fn max_abs(&self) -> f64 {
        self.field().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}
