//! Pipeline validation.
//!
//! [`validate_pipeline`] runs once at solver construction to check the
//! stage list for structural errors and the Courant number against each
//! stage's stability bound. It returns a [`PipelinePlan`] recording the
//! stage order and the bound that applies.

use indexmap::IndexMap;

use crate::propagator::Propagator;

use std::error::Error;
use std::fmt;

// ── Plan ───────────────────────────────────────────────────────────

/// Result of a successful validation.
///
/// Maps each stage name to its position and declared Courant bound, in
/// pipeline order.
#[derive(Debug)]
#[must_use]
pub struct PipelinePlan {
    stages: IndexMap<String, Option<f64>>,
    max_courant: Option<(f64, usize)>,
}

impl PipelinePlan {
    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the plan covers zero stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Position of the named stage in the pipeline.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.stages.get_index_of(name)
    }

    /// The tightest Courant bound across all stages, if any declares one.
    pub fn max_courant(&self) -> Option<f64> {
        self.max_courant.map(|(c, _)| c)
    }

    /// Name of the stage imposing [`max_courant`](Self::max_courant).
    pub fn constraining_stage(&self) -> Option<&str> {
        let (_, index) = self.max_courant?;
        self.stages.get_index(index).map(|(name, _)| name.as_str())
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from pipeline validation (startup-time, not per-step).
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No stages registered.
    EmptyPipeline,

    /// Two stages share a name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// The configured Courant number exceeds a stage's `max_courant`.
    CourantTooLarge {
        /// The Courant number that was requested.
        configured: f64,
        /// The tightest `max_courant` bound.
        max_supported: f64,
        /// Which stage constrains it.
        constraining_propagator: String,
    },

    /// The Courant number is not finite and positive.
    InvalidCourant {
        /// The invalid value.
        value: f64,
    },

    /// A stage's `max_courant()` returned a non-finite or non-positive value.
    InvalidMaxCourant {
        /// Which stage.
        propagator: String,
        /// The invalid bound.
        value: f64,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no propagators"),
            Self::DuplicateName { name } => {
                write!(f, "propagator name '{name}' appears more than once")
            }
            Self::CourantTooLarge {
                configured,
                max_supported,
                constraining_propagator,
            } => {
                write!(
                    f,
                    "Courant number {configured} exceeds {max_supported} \
                     (constrained by '{constraining_propagator}')"
                )
            }
            Self::InvalidCourant { value } => {
                write!(f, "Courant number must be finite and positive, got {value}")
            }
            Self::InvalidMaxCourant { propagator, value } => {
                write!(
                    f,
                    "propagator '{propagator}' returned invalid max_courant: {value} \
                     (must be finite and positive)"
                )
            }
        }
    }
}

impl Error for PipelineError {}

// ── Validation ─────────────────────────────────────────────────────

/// Validate a stage list and build the [`PipelinePlan`].
///
/// Checks performed (all at startup, not per-step):
///
/// 1. `courant` is finite and positive.
/// 2. Pipeline is non-empty.
/// 3. Stage names are unique.
/// 4. `courant <= min(max_courant)` across all stages.
pub fn validate_pipeline(
    propagators: &[Box<dyn Propagator>],
    courant: f64,
) -> Result<PipelinePlan, PipelineError> {
    if !courant.is_finite() || courant <= 0.0 {
        return Err(PipelineError::InvalidCourant { value: courant });
    }

    if propagators.is_empty() {
        return Err(PipelineError::EmptyPipeline);
    }

    let mut stages: IndexMap<String, Option<f64>> = IndexMap::with_capacity(propagators.len());
    for prop in propagators {
        let bound = prop.max_courant();
        if let Some(max) = bound {
            if !max.is_finite() || max <= 0.0 {
                return Err(PipelineError::InvalidMaxCourant {
                    propagator: prop.name().to_string(),
                    value: max,
                });
            }
        }
        if stages.insert(prop.name().to_string(), bound).is_some() {
            return Err(PipelineError::DuplicateName {
                name: prop.name().to_string(),
            });
        }
    }

    let mut tightest: Option<(f64, usize)> = None;
    for (i, bound) in stages.values().enumerate() {
        if let Some(max) = *bound {
            if tightest.is_none_or(|(current, _)| max < current) {
                tightest = Some((max, i));
            }
        }
    }

    if let Some((max, i)) = tightest {
        if courant > max {
            return Err(PipelineError::CourantTooLarge {
                configured: courant,
                max_supported: max,
                constraining_propagator: propagators[i].name().to_string(),
            });
        }
    }

    Ok(PipelinePlan {
        stages,
        max_courant: tightest,
    })
}
