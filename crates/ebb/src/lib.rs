//! Ebb: a finite-difference solver for the 1D wave equation with
//! absorbing boundaries.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all ebb sub-crates. For most users, adding `ebb` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ebb::prelude::*;
//!
//! // The default configuration is the reference run: a Gaussian pulse
//! // at x = 0.5 on [0, 1], Courant number 0.5, 7-point damping zones.
//! let mut solver = SolverState::new(SimulationConfig::default()).unwrap();
//! assert_eq!(solver.params().step_count(), 201);
//!
//! let snap = solver.advance().unwrap();
//! assert_eq!(snap.step(), StepIndex(1));
//! assert!((snap.field()[50] - 0.97561).abs() < 1e-5);
//! ```
//!
//! A custom pipeline replaces the built-in one, so the caller supplies
//! every stage, the leapfrog update included:
//!
//! ```rust
//! use ebb::prelude::*;
//!
//! // Clamp the field to [-1, 1] after every step.
//! struct Clamp;
//! impl Propagator for Clamp {
//!     fn name(&self) -> &str { "clamp" }
//!     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
//!         for v in ctx.future() {
//!             *v = v.clamp(-1.0, 1.0);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let config = SimulationConfig { damping: None, ..Default::default() };
//! let stages: Vec<Box<dyn Propagator>> = vec![
//!     Box::new(Leapfrog::builder().build().unwrap()),
//!     Box::new(Clamp),
//! ];
//! let mut solver = SolverState::with_stages(config, stages).unwrap();
//! solver.run_to_end().unwrap();
//! assert!(solver.snapshot().max_abs() <= 1.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `ebb-arena` | Triple buffer, `Snapshot`, `Frame` |
//! | [`types`] | `ebb-core` | Step index, error types, `SnapshotAccess` |
//! | [`space`] | `ebb-space` | The uniform 1D grid |
//! | [`propagator`] | `ebb-propagator` | Propagator trait and pipeline validation |
//! | [`propagators`] | `ebb-propagators` | Leapfrog, absorbing boundary, initial conditions |
//! | [`engine`] | `ebb-engine` | Configuration and the solver loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Field storage and read views (`ebb-arena`).
///
/// Most users only need [`arena::Snapshot`] and [`arena::Frame`], both
/// also in the [`prelude`].
pub use ebb_arena as arena;

/// Core types, traits, and errors (`ebb-core`).
pub use ebb_core as types;

/// The uniform 1D grid (`ebb-space`).
pub use ebb_space as space;

/// Propagator trait and pipeline validation (`ebb-propagator`).
///
/// The [`propagator::Propagator`] trait is the extension point for
/// custom pipeline stages.
pub use ebb_propagator as propagator;

/// Built-in stages and initial conditions (`ebb-propagators`).
///
/// Includes [`propagators::Leapfrog`], [`propagators::AbsorbingBoundary`]
/// and [`propagators::GaussianPulse`], plus the free functions
/// [`propagators::initial_condition`] and
/// [`propagators::absorbing_boundary`].
pub use ebb_propagators as propagators;

/// Configuration and the solver loop (`ebb-engine`).
pub use ebb_engine as engine;

/// Common imports for typical ebb usage.
///
/// ```rust
/// use ebb::prelude::*;
/// ```
pub mod prelude {
    // Arena views
    pub use ebb_arena::{Frame, Snapshot};

    // Core types and traits
    pub use ebb_core::{SnapshotAccess, StepIndex};

    // Errors
    pub use ebb_core::{PropagatorError, StepError};
    pub use ebb_engine::ConfigError;

    // Space
    pub use ebb_space::SpatialGrid;

    // Propagator
    pub use ebb_propagator::{Propagator, StepContext};

    // Built-in stages
    pub use ebb_propagators::{
        AbsorbingBoundary, GaussianPulse, InitialCondition, Leapfrog, RightZone,
    };

    // Engine
    pub use ebb_engine::{
        DampingConfig, Presenter, SimulationConfig, SimulationParams, SolverState, StepMetrics,
    };
}
