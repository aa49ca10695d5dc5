//! Propagator trait and step context for the ebb wave solver.
//!
//! A step runs an ordered pipeline of [`Propagator`]s over one
//! [`StepContext`]: the first stage fills the future buffer from the past
//! and current time levels, later stages post-process it in place.
//! [`validate_pipeline`] checks the stage list once at startup.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod pipeline;
pub mod propagator;

pub use context::StepContext;
pub use pipeline::{validate_pipeline, PipelineError, PipelinePlan};
pub use propagator::Propagator;
