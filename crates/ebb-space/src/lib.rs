//! Spatial grid for ebb simulations.
//!
//! [`SpatialGrid`] is the immutable, uniformly spaced coordinate sequence
//! every field snapshot is sampled on. It is built once at simulation
//! start and shared read-only by every pipeline stage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::GridError;
pub use grid::SpatialGrid;
