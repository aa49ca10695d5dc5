//! Reference propagators for the ebb wave solver.
//!
//! Provides the numerical stages of one time step and the initial
//! condition that seeds step 0.
//!
//! # Pipeline order (each step)
//!
//! 1. [`Leapfrog`]: past + current → future (interior points only)
//! 2. [`AbsorbingBoundary`]: damps the future field near both ends
//!
//! The damping stage is optional; without it the boundary points stay
//! at zero.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod absorbing;
pub mod initial_condition;
pub mod leapfrog;

pub use absorbing::{absorbing_boundary, AbsorbingBoundary, DampingProfile, RightZone};
pub use initial_condition::{initial_condition, GaussianPulse, InitialCondition};
pub use leapfrog::Leapfrog;
