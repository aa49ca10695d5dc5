//! Error types for the ebb wave solver.
//!
//! Organised by subsystem: [`StepError`] surfaces from the solver's
//! `advance()`, [`PropagatorError`] from an individual pipeline stage.
//! Setup-time validation errors live next to the configuration in
//! `ebb-engine`.

use std::error::Error;
use std::fmt;

use crate::id::StepIndex;

/// Errors from the solver during `advance()`.
///
/// Every variant leaves the solver in the state it had before the call:
/// the future buffer is scratch until rotation, so a failed step is
/// discarded as a unit.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A pipeline stage returned an error during execution.
    PropagatorFailed {
        /// Name of the failing stage.
        name: String,
        /// The underlying stage error.
        reason: PropagatorError,
    },
    /// Buffer state is inconsistent with the grid, or the solver has not
    /// been initialized.
    InvalidConfiguration {
        /// What was inconsistent.
        reason: String,
    },
    /// The freshly computed field exceeded the configured magnitude
    /// threshold or contained a non-finite value.
    NumericalInstability {
        /// The step that would have been produced.
        step: StepIndex,
        /// Index of the first offending grid point.
        cell: usize,
        /// The offending value.
        value: f64,
        /// The configured magnitude threshold.
        threshold: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropagatorFailed { name, reason } => {
                write!(f, "propagator '{name}' failed: {reason}")
            }
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::NumericalInstability {
                step,
                cell,
                value,
                threshold,
            } => write!(
                f,
                "numerical instability at step {step}: |u[{cell}]| = {value} exceeds {threshold}"
            ),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PropagatorFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from an individual pipeline stage.
///
/// Returned by `Propagator::step()` and wrapped in
/// [`StepError::PropagatorFailed`] by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagatorError {
    /// The stage could not run.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The stage's parameters do not fit the field it was handed
    /// (buffer length mismatch, overlapping damping zones).
    InvalidConfiguration {
        /// Human-readable description of the mismatch.
        reason: String,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl Error for PropagatorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagator_failure_chains_source() {
        let err = StepError::PropagatorFailed {
            name: "leapfrog".to_string(),
            reason: PropagatorError::ExecutionFailed {
                reason: "boom".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "propagator 'leapfrog' failed: execution failed: boom"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "execution failed: boom");
    }

    #[test]
    fn instability_names_step_and_cell() {
        let err = StepError::NumericalInstability {
            step: StepIndex(12),
            cell: 3,
            value: 1e9,
            threshold: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("step 12"), "{msg}");
        assert!(msg.contains("u[3]"), "{msg}");
        assert!(err.source().is_none());
    }
}
