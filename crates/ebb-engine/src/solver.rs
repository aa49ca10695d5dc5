//! The solver: a single-threaded time-stepping loop.
//!
//! [`SolverState`] wires together the grid, the triple buffer and the
//! stage pipeline into a deterministic step loop with rollback
//! atomicity. Step 0 is the initial condition; every
//! [`advance()`](SolverState::advance) produces exactly one more time
//! level. There is no terminal state: [`is_finished()`](SolverState::is_finished)
//! reports when the configured duration is covered, but stepping past it
//! is allowed.

use std::fmt;
use std::time::Instant;

use ebb_arena::{Frame, Snapshot, StepBuffers, TripleBuffer};
use ebb_core::{SnapshotAccess, StepError, StepIndex};
use ebb_propagator::{validate_pipeline, Propagator, StepContext};
use ebb_propagators::InitialCondition;
use ebb_space::SpatialGrid;
use indexmap::IndexMap;
use log::{info, trace, warn};

use crate::config::{ConfigError, SimulationConfig, SimulationParams, Stages};
use crate::metrics::StepMetrics;

// ── Presenter ──────────────────────────────────────────────────────

/// Consumer of published time levels, such as a plotting loop.
///
/// Receives a borrowed view after each step and must copy whatever it
/// keeps; the underlying buffer is reused two steps later. Any
/// `FnMut(&Snapshot<'_>)` is a presenter.
pub trait Presenter {
    /// Handle the time level just produced.
    fn present(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> Presenter for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn present(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

// ── SolverState ────────────────────────────────────────────────────

/// Owns all simulation state and executes steps synchronously.
///
/// # Examples
///
/// ```
/// use ebb_core::SnapshotAccess;
/// use ebb_engine::{SimulationConfig, SolverState};
///
/// let mut solver = SolverState::new(SimulationConfig::default()).unwrap();
/// assert_eq!(solver.grid().len(), 101);
/// assert_eq!(solver.courant(), 0.5);
///
/// let snap = solver.advance().unwrap();
/// assert_eq!(snap.step().0, 1);
/// assert!(snap.max_abs() < 1.0);
/// ```
pub struct SolverState {
    grid: SpatialGrid,
    params: SimulationParams,
    buffers: TripleBuffer,
    stages: Stages,
    initial: Box<dyn InitialCondition>,
    instability_threshold: Option<f64>,
    last_metrics: StepMetrics,
    rollback_count: u64,
}

impl SolverState {
    /// Construct a solver running the default pipeline: leapfrog, then
    /// damping if configured.
    ///
    /// Validates the configuration, samples the initial condition and
    /// allocates the three field buffers. Consumes the config.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let grid = config.validate_structure()?;
        let stages = config.build_stages(&grid)?;
        if config.damping.is_some_and(|d| d.width == 0) {
            warn!("damping configured with zero width; boundary points stay at zero");
        }
        Self::assemble(config, grid, stages)
    }

    /// Construct a solver running a caller-supplied pipeline.
    ///
    /// `config.damping` is ignored; every stage comes from `stages`, in
    /// order. The Courant number is still checked against each stage's
    /// `max_courant()`.
    pub fn with_stages(
        config: SimulationConfig,
        stages: Vec<Box<dyn Propagator>>,
    ) -> Result<Self, ConfigError> {
        let grid = config.validate_structure()?;
        Self::assemble(config, grid, stages.into_iter().collect())
    }

    fn assemble(
        config: SimulationConfig,
        grid: SpatialGrid,
        stages: Stages,
    ) -> Result<Self, ConfigError> {
        let params = config.params();
        let plan = validate_pipeline(&stages, params.courant)?;
        let buffers = TripleBuffer::new(config.initial.sample(grid.coords()))?;

        info!(
            "solver ready: {} points on [{}, {}], C = {}, {} time levels, stages [{}]",
            grid.len(),
            config.xmin,
            config.xmax,
            params.courant,
            params.step_count(),
            plan.stage_names().collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            grid,
            params,
            buffers,
            stages,
            initial: config.initial,
            instability_threshold: config.instability_threshold,
            last_metrics: StepMetrics::default(),
            rollback_count: 0,
        })
    }

    /// Advance one time step and return a view of the new field.
    ///
    /// Runs every stage over the future buffer, then checks the
    /// instability guard. On success the buffer roles rotate and the
    /// step index increments. On failure nothing is published: past,
    /// current and the step index are exactly as before the call.
    pub fn advance(&mut self) -> Result<Snapshot<'_>, StepError> {
        let step_start = Instant::now();
        let next = self.current_step().next();
        let mut propagator_us = IndexMap::with_capacity(self.stages.len());

        let outcome = {
            let StepBuffers {
                past,
                current,
                future,
            } = self.buffers.begin_step();
            let mut ctx = StepContext::new(
                past,
                current,
                future,
                &self.grid,
                next,
                self.params.courant,
                self.params.dt,
            );
            run_stages(&self.stages, &mut ctx, &mut propagator_us)
                .and_then(|()| check_field(ctx.future_view(), next, self.instability_threshold))
        };

        if let Err(e) = outcome {
            self.rollback_count += 1;
            warn!("step {next} rolled back: {e}");
            return Err(e);
        }

        self.buffers.rotate();
        let snapshot = self.buffers.snapshot(self.params.dt);
        self.last_metrics = StepMetrics {
            step: next,
            total_us: step_start.elapsed().as_micros() as u64,
            propagator_us,
            max_abs: snapshot.max_abs(),
        };
        trace!(
            "step {next} t = {:.6} max |u| = {:.6e} in {} us",
            snapshot.time(),
            self.last_metrics.max_abs,
            self.last_metrics.total_us
        );
        Ok(snapshot)
    }

    /// View of the current time level.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.buffers.snapshot(self.params.dt)
    }

    /// Index of the current time level.
    pub fn current_step(&self) -> StepIndex {
        StepIndex(self.buffers.generation())
    }

    /// Simulated time of the current level.
    pub fn time(&self) -> f64 {
        self.current_step().time(self.params.dt)
    }

    /// The spatial grid.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// The derived scalars.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Courant number `v * dt / dx`.
    pub fn courant(&self) -> f64 {
        self.params.courant
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name())
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Failed steps since construction or the last reset.
    pub fn rollback_count(&self) -> u64 {
        self.rollback_count
    }

    /// Whether the last configured time level (`t = duration`) has been
    /// produced.
    pub fn is_finished(&self) -> bool {
        self.current_step().0.saturating_add(1) >= self.params.step_count()
    }

    /// Advance until [`is_finished()`](Self::is_finished). Returns the
    /// final step index.
    pub fn run_to_end(&mut self) -> Result<StepIndex, StepError> {
        while !self.is_finished() {
            self.advance()?;
        }
        Ok(self.current_step())
    }

    /// Advance `steps` times, handing each new level to `presenter`.
    ///
    /// Stops at the first failed step; levels presented before it stay
    /// published.
    pub fn drive<P>(&mut self, presenter: &mut P, steps: u64) -> Result<StepIndex, StepError>
    where
        P: Presenter + ?Sized,
    {
        for _ in 0..steps {
            let snapshot = self.advance()?;
            presenter.present(&snapshot);
        }
        Ok(self.current_step())
    }

    /// Run to the end, keeping an owned copy of the current level and of
    /// every later level whose step index is a multiple of `every`.
    ///
    /// `every = 0` is treated as 1.
    pub fn record(&mut self, every: u64) -> Result<Vec<Frame>, StepError> {
        let every = every.max(1);
        let mut frames = vec![self.snapshot().to_frame()];
        while !self.is_finished() {
            let snapshot = self.advance()?;
            if snapshot.step().0 % every == 0 {
                frames.push(snapshot.to_frame());
            }
        }
        Ok(frames)
    }

    /// Return to step 0 with the initial condition re-sampled.
    pub fn reset(&mut self) -> Result<(), StepError> {
        let field = self.initial.sample(self.grid.coords());
        self.reset_with(&field)
    }

    /// Return to step 0 with `field` as the initial displacement.
    ///
    /// Initial velocity is zero, as for the configured initial condition.
    /// Returns `StepError::InvalidConfiguration` if `field` does not
    /// match the grid; the solver is untouched then.
    pub fn reset_with(&mut self, field: &[f64]) -> Result<(), StepError> {
        self.buffers
            .reset(field)
            .map_err(|e| StepError::InvalidConfiguration {
                reason: e.to_string(),
            })?;
        self.last_metrics = StepMetrics::default();
        self.rollback_count = 0;
        info!("solver reset to step 0 ({} points)", self.grid.len());
        Ok(())
    }
}

impl fmt::Debug for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverState")
            .field("grid_len", &self.grid.len())
            .field("params", &self.params)
            .field("step", &self.current_step())
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .field("instability_threshold", &self.instability_threshold)
            .field("rollback_count", &self.rollback_count)
            .finish_non_exhaustive()
    }
}

/// Run each stage in order, recording its wall-clock time.
fn run_stages(
    stages: &[Box<dyn Propagator>],
    ctx: &mut StepContext<'_>,
    timings: &mut IndexMap<String, u64>,
) -> Result<(), StepError> {
    for stage in stages {
        let stage_start = Instant::now();
        stage
            .step(ctx)
            .map_err(|reason| StepError::PropagatorFailed {
                name: stage.name().to_string(),
                reason,
            })?;
        timings.insert(
            stage.name().to_string(),
            stage_start.elapsed().as_micros() as u64,
        );
    }
    Ok(())
}

/// The instability guard: first non-finite value or value beyond
/// `threshold`.
fn check_field(field: &[f64], step: StepIndex, threshold: Option<f64>) -> Result<(), StepError> {
    let Some(threshold) = threshold else {
        return Ok(());
    };
    match field
        .iter()
        .position(|v| !v.is_finite() || v.abs() > threshold)
    {
        Some(cell) => Err(StepError::NumericalInstability {
            step,
            cell,
            value: field[cell],
            threshold,
        }),
        None => Ok(()),
    }
}
