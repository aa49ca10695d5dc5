//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input for constructing a solver.
//! [`validate()`](SimulationConfig::validate) checks every structural
//! invariant before any field buffer is allocated; the solver
//! constructor runs the same checks and keeps the grid and pipeline they
//! produce.

use std::error::Error;
use std::fmt;

use ebb_arena::ArenaError;
use ebb_propagator::{validate_pipeline, PipelineError, Propagator};
use ebb_propagators::{AbsorbingBoundary, GaussianPulse, InitialCondition, Leapfrog, RightZone};
use ebb_space::{GridError, SpatialGrid};
use smallvec::SmallVec;

/// Inline storage for the stage list; the reference pipeline has two.
pub(crate) type Stages = SmallVec<[Box<dyn Propagator>; 4]>;

/// Relative tolerance when rounding `duration / dt` up to whole steps.
const STEP_SNAP_TOLERANCE: f64 = 1e-9;

// ── DampingConfig ──────────────────────────────────────────────────

/// Absorbing-zone settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampingConfig {
    /// Zone width in grid points at each end. Default: 7.
    pub width: usize,
    /// Damping strength. Default: 0.8.
    pub strength: f64,
    /// Right-zone update policy. Default: [`RightZone::Broadcast`].
    pub right_zone: RightZone,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            width: 7,
            strength: 0.8,
            right_zone: RightZone::Broadcast,
        }
    }
}

// ── SimulationParams ───────────────────────────────────────────────

/// Scalars derived once from a validated configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Wave speed.
    pub v: f64,
    /// Time step.
    pub dt: f64,
    /// Grid spacing.
    pub dx: f64,
    /// Courant number `v * dt / dx`.
    pub courant: f64,
    /// Total simulated duration.
    pub duration: f64,
}

impl SimulationParams {
    /// Number of time levels on `t = 0, dt, ..., duration`:
    /// `ceil(duration / dt) + 1`.
    pub fn step_count(&self) -> u64 {
        let ratio = self.duration / self.dt;
        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= STEP_SNAP_TOLERANCE * nearest.abs().max(1.0) {
            nearest
        } else {
            ratio.ceil()
        };
        (steps.max(0.0) as u64).saturating_add(1)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulationConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A parameter that must be finite and positive is not.
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The domain bounds are not finite or `xmin >= xmax`.
    EmptyDomain {
        /// Left bound.
        xmin: f64,
        /// Right bound.
        xmax: f64,
    },
    /// `duration` is negative or not finite.
    InvalidDuration {
        /// The invalid value.
        value: f64,
    },
    /// `duration / dt` steps do not fit a `u64` step counter.
    TooManySteps {
        /// Configured duration.
        duration: f64,
        /// Configured time step.
        dt: f64,
    },
    /// The two damping zones would meet (`2 * width >= cells`).
    DampingZoneTooWide {
        /// Configured zone width.
        width: usize,
        /// Grid length.
        cells: usize,
    },
    /// Damping strength is negative or not finite.
    InvalidDampingStrength {
        /// The invalid value.
        value: f64,
    },
    /// The instability threshold is not finite and positive.
    InvalidThreshold {
        /// The invalid value.
        value: f64,
    },
    /// A pipeline stage rejected its parameters.
    InvalidStage {
        /// Stage name.
        name: &'static str,
        /// Builder message.
        reason: String,
    },
    /// Grid construction failed.
    Grid(GridError),
    /// Field buffer construction failed.
    Arena(ArenaError),
    /// Pipeline validation failed (including Courant numbers above the
    /// stable bound).
    Pipeline(PipelineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::EmptyDomain { xmin, xmax } => {
                write!(f, "domain [{xmin}, {xmax}] must be finite with xmin < xmax")
            }
            Self::InvalidDuration { value } => {
                write!(f, "duration must be finite and >= 0, got {value}")
            }
            Self::TooManySteps { duration, dt } => {
                write!(f, "duration {duration} at dt = {dt} needs more steps than a u64 counts")
            }
            Self::DampingZoneTooWide { width, cells } => {
                write!(
                    f,
                    "damping width {width} leaves no interior on a {cells}-point grid"
                )
            }
            Self::InvalidDampingStrength { value } => {
                write!(f, "damping strength must be finite and >= 0, got {value}")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "instability threshold must be finite and positive, got {value}")
            }
            Self::InvalidStage { name, reason } => {
                write!(f, "stage '{name}': {reason}")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Arena(e) => Some(e),
            Self::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<PipelineError> for ConfigError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete configuration for constructing a [`SolverState`](crate::SolverState).
///
/// `Default` is the reference scenario: a Gaussian pulse at `x = 0.5` on
/// `[0, 1]` with `dx = 0.01`, `v = 1`, `dt = 0.005` (Courant number 0.5)
/// for one time unit, damped over 7 points at each end.
pub struct SimulationConfig {
    /// Left domain bound.
    pub xmin: f64,
    /// Right domain bound.
    pub xmax: f64,
    /// Grid spacing.
    pub dx: f64,
    /// Wave speed.
    pub v: f64,
    /// Time step.
    pub dt: f64,
    /// Total simulated duration.
    pub duration: f64,
    /// Absorbing zones. `None` leaves the damping stage out of the
    /// pipeline.
    pub damping: Option<DampingConfig>,
    /// Field at `t = 0`.
    pub initial: Box<dyn InitialCondition>,
    /// Fail a step whose field leaves `[-threshold, threshold]` or turns
    /// non-finite. `None` disables the check.
    pub instability_threshold: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 1.0,
            dx: 0.01,
            v: 1.0,
            dt: 0.005,
            duration: 1.0,
            damping: Some(DampingConfig::default()),
            initial: Box::new(GaussianPulse::default()),
            instability_threshold: None,
        }
    }
}

impl SimulationConfig {
    /// Validate all structural invariants and the default pipeline.
    ///
    /// This is a pure validation pass; it allocates the grid coordinates
    /// but no field buffers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.validate_structure()?;
        let stages = self.build_stages(&grid)?;
        let _ = validate_pipeline(&stages, self.courant())?;
        Ok(())
    }

    /// Courant number `v * dt / dx`.
    pub fn courant(&self) -> f64 {
        self.v * self.dt / self.dx
    }

    /// The derived scalars. Meaningful only for a valid configuration.
    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            v: self.v,
            dt: self.dt,
            dx: self.dx,
            courant: self.courant(),
            duration: self.duration,
        }
    }

    /// Everything except the pipeline. Returns the grid on success.
    pub(crate) fn validate_structure(&self) -> Result<SpatialGrid, ConfigError> {
        // 1. Scalars.
        for (name, value) in [("dx", self.dx), ("v", self.v), ("dt", self.dt)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.xmin.is_finite() && self.xmax.is_finite() && self.xmin < self.xmax) {
            return Err(ConfigError::EmptyDomain {
                xmin: self.xmin,
                xmax: self.xmax,
            });
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                value: self.duration,
            });
        }
        if !(self.duration / self.dt < u64::MAX as f64) {
            return Err(ConfigError::TooManySteps {
                duration: self.duration,
                dt: self.dt,
            });
        }

        // 2. Grid.
        let grid = SpatialGrid::new(self.xmin, self.xmax, self.dx)?;

        // 3. Damping zones must leave an interior between them.
        if let Some(damping) = &self.damping {
            if damping.width > 0 && damping.width >= grid.len().div_ceil(2) {
                return Err(ConfigError::DampingZoneTooWide {
                    width: damping.width,
                    cells: grid.len(),
                });
            }
            if !(damping.strength.is_finite() && damping.strength >= 0.0) {
                return Err(ConfigError::InvalidDampingStrength {
                    value: damping.strength,
                });
            }
        }

        // 4. Guard threshold.
        if let Some(threshold) = self.instability_threshold {
            if !(threshold.is_finite() && threshold > 0.0) {
                return Err(ConfigError::InvalidThreshold { value: threshold });
            }
        }

        Ok(grid)
    }

    /// The default pipeline: leapfrog, then damping if configured.
    pub(crate) fn build_stages(&self, grid: &SpatialGrid) -> Result<Stages, ConfigError> {
        let mut stages = Stages::new();
        let leapfrog = Leapfrog::builder()
            .build()
            .map_err(|reason| ConfigError::InvalidStage {
                name: "leapfrog",
                reason,
            })?;
        stages.push(Box::new(leapfrog));

        if let Some(damping) = &self.damping {
            let absorbing = AbsorbingBoundary::builder()
                .grid(grid)
                .width(damping.width)
                .strength(damping.strength)
                .right_zone(damping.right_zone)
                .build()
                .map_err(|reason| ConfigError::InvalidStage {
                    name: "absorbing_boundary",
                    reason,
                })?;
            stages.push(Box::new(absorbing));
        }
        Ok(stages)
    }
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationConfig")
            .field("xmin", &self.xmin)
            .field("xmax", &self.xmax)
            .field("dx", &self.dx)
            .field("v", &self.v)
            .field("dt", &self.dt)
            .field("duration", &self.duration)
            .field("damping", &self.damping)
            .field("instability_threshold", &self.instability_threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_scenario() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.courant(), 0.5);
        let params = cfg.params();
        assert_eq!(params.step_count(), 201);
        assert_eq!(cfg.damping.unwrap().width, 7);
    }

    #[test]
    fn step_count_rounds_up() {
        let mut params = SimulationConfig::default().params();
        params.duration = 0.0;
        assert_eq!(params.step_count(), 1);
        params.duration = 0.012;
        assert_eq!(params.step_count(), 4);
        params.duration = 0.3;
        params.dt = 0.1;
        assert_eq!(params.step_count(), 4);
    }

    #[test]
    fn validate_rejects_unrepresentable_step_count() {
        let cfg = SimulationConfig {
            duration: 1e20,
            ..SimulationConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::TooManySteps { duration, dt }) => {
                assert_eq!((duration, dt), (1e20, 0.005));
            }
            other => panic!("expected TooManySteps, got {other:?}"),
        }
        assert!(crate::SolverState::new(cfg).is_err());

        // Just inside the counter: accepted, and the count saturates
        // instead of wrapping.
        let cfg = SimulationConfig {
            duration: 9e18,
            dt: 1.0,
            dx: 1.0,
            xmax: 4.0,
            damping: None,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.params().step_count(), 9_000_000_000_000_000_001);
    }

    #[test]
    fn step_count_saturates() {
        let mut params = SimulationConfig::default().params();
        params.duration = 1e30;
        assert_eq!(params.step_count(), u64::MAX);
    }

    fn expect_non_positive(cfg: SimulationConfig, name: &str) {
        match cfg.validate() {
            Err(ConfigError::NonPositive { name: got, .. }) => assert_eq!(got, name),
            other => panic!("expected NonPositive({name}), got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_non_positive_scalars() {
        let defaults = SimulationConfig::default;
        expect_non_positive(SimulationConfig { dx: 0.0, ..defaults() }, "dx");
        expect_non_positive(SimulationConfig { v: -1.0, ..defaults() }, "v");
        expect_non_positive(SimulationConfig { dt: f64::NAN, ..defaults() }, "dt");
    }

    #[test]
    fn validate_rejects_inverted_domain() {
        let cfg = SimulationConfig {
            xmin: 1.0,
            xmax: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyDomain { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_duration() {
        let cfg = SimulationConfig {
            duration: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn validate_rejects_tiny_grid() {
        let cfg = SimulationConfig {
            dx: 0.75,
            dt: 0.1,
            ..SimulationConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Grid(GridError::TooFewPoints { len: 2, .. })) => {}
            other => panic!("expected Grid(TooFewPoints), got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_overlapping_zones() {
        let cfg = SimulationConfig {
            damping: Some(DampingConfig {
                width: 51,
                ..DampingConfig::default()
            }),
            ..SimulationConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::DampingZoneTooWide { width, cells }) => {
                assert_eq!((width, cells), (51, 101));
            }
            other => panic!("expected DampingZoneTooWide, got {other:?}"),
        }

        let cfg = SimulationConfig {
            damping: Some(DampingConfig {
                width: 50,
                ..DampingConfig::default()
            }),
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_strength() {
        let cfg = SimulationConfig {
            damping: Some(DampingConfig {
                strength: -0.5,
                ..DampingConfig::default()
            }),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDampingStrength { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let cfg = SimulationConfig {
            instability_threshold: Some(0.0),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn courant_above_one_rejected() {
        let cfg = SimulationConfig {
            dt: 0.011,
            ..SimulationConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Pipeline(PipelineError::CourantTooLarge {
                max_supported,
                constraining_propagator,
                ..
            })) => {
                assert_eq!(max_supported, 1.0);
                assert_eq!(constraining_propagator, "leapfrog");
            }
            other => panic!("expected Pipeline(CourantTooLarge), got {other:?}"),
        }
    }

    #[test]
    fn courant_of_exactly_one_accepted() {
        let cfg = SimulationConfig {
            dt: 0.01,
            ..SimulationConfig::default()
        };
        assert_eq!(cfg.courant(), 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn undamped_pipeline_has_one_stage() {
        let cfg = SimulationConfig {
            damping: None,
            ..SimulationConfig::default()
        };
        let grid = cfg.validate_structure().unwrap();
        let stages = cfg.build_stages(&grid).unwrap();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].name(), "leapfrog");
        assert!(!stages.spilled());
    }

    #[test]
    fn error_source_chains() {
        let err = ConfigError::from(GridError::NonPositiveSpacing { dx: 0.0 });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("grid: "));
        let err = ConfigError::InvalidDuration { value: -1.0 };
        assert!(err.source().is_none());
    }

    #[test]
    fn debug_skips_initial_condition() {
        let s = format!("{:?}", SimulationConfig::default());
        assert!(s.contains("dx: 0.01"), "{s}");
        assert!(s.ends_with(".. }"), "{s}");
    }
}
