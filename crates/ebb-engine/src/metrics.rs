//! Per-step performance metrics for the solver.
//!
//! [`StepMetrics`] captures timing data and the field magnitude for a
//! single step.

use ebb_core::StepIndex;
use indexmap::IndexMap;

/// Timing and magnitude metrics collected during a single step.
///
/// All durations are in microseconds. The solver populates these fields
/// after each successful `advance()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// The step these metrics describe.
    pub step: StepIndex,
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Per-stage execution times in pipeline order.
    pub propagator_us: IndexMap<String, u64>,
    /// Largest absolute displacement in the published field.
    pub max_abs: f64,
}

impl StepMetrics {
    /// Combined time spent inside pipeline stages, in microseconds.
    pub fn pipeline_us(&self) -> u64 {
        self.propagator_us.values().sum()
    }
}
