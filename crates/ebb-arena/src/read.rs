//! Read-only views of the published field.
//!
//! [`Snapshot`] borrows the current buffer of a [`TripleBuffer`] and
//! implements [`SnapshotAccess`]. It is the primary interface for
//! presentation drivers. [`Frame`] is an owned copy for callers that
//! need to keep a field past the next step.

use ebb_core::{SnapshotAccess, StepIndex};

use crate::triple::TripleBuffer;

/// A read-only view of the current time level.
///
/// # Lifetime
///
/// `'a` is the borrow of the `TripleBuffer`. The snapshot cannot outlive
/// it, and because advancing needs `&mut`, no snapshot can be held
/// across a step. Buffer memory is recycled on the next rotation, so
/// call [`to_frame()`](Snapshot::to_frame) to keep the data.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    field: &'a [f64],
    step: StepIndex,
    time: f64,
}

impl<'a> Snapshot<'a> {
    /// Create a snapshot over an arbitrary field slice.
    pub fn new(field: &'a [f64], step: StepIndex, time: f64) -> Self {
        Self { field, step, time }
    }

    /// The borrowed field, with the buffer's lifetime.
    pub fn data(&self) -> &'a [f64] {
        self.field
    }

    /// Copy the view into an owned [`Frame`].
    pub fn to_frame(&self) -> Frame {
        Frame {
            step: self.step,
            time: self.time,
            field: self.field.to_vec(),
        }
    }
}

impl SnapshotAccess for Snapshot<'_> {
    fn field(&self) -> &[f64] {
        self.field
    }

    fn step(&self) -> StepIndex {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }
}

/// An owned copy of one time level.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The step at which the field was produced.
    pub step: StepIndex,
    /// Simulated time of the field.
    pub time: f64,
    /// Displacement at every grid point.
    pub field: Vec<f64>,
}

impl SnapshotAccess for Frame {
    fn field(&self) -> &[f64] {
        &self.field
    }

    fn step(&self) -> StepIndex {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }
}

impl TripleBuffer {
    /// Borrow the current time level as a [`Snapshot`].
    ///
    /// The step index is the number of rotations since the last reset;
    /// `dt` converts it to simulated time.
    pub fn snapshot(&self, dt: f64) -> Snapshot<'_> {
        let step = StepIndex(self.generation());
        Snapshot::new(self.current(), step, step.time(dt))
    }
}
