//! Core types and traits for the ebb wave solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the step counter, the read-only snapshot trait consumed by
//! presentation drivers, and the error types shared by every stage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{PropagatorError, StepError};
pub use id::StepIndex;
pub use traits::SnapshotAccess;
