//! Time-stepping solver orchestrating the ebb wave pipeline.
//!
//! [`SolverState`] owns the grid, the triple buffer and the stage
//! pipeline built from a [`SimulationConfig`]. Each
//! [`advance()`](SolverState::advance) runs the pipeline once, checks the
//! optional instability guard, and publishes the new time level as a
//! read-only [`Snapshot`](ebb_arena::Snapshot). A [`Presenter`] is the
//! seam for whatever renders those snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod solver;

pub use config::{ConfigError, DampingConfig, SimulationConfig, SimulationParams};
pub use metrics::StepMetrics;
pub use solver::{Presenter, SolverState};
