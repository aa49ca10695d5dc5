//! Field storage for ebb simulations.
//!
//! The solver keeps three time levels live at once. Rather than
//! allocating a fresh buffer per step, [`TripleBuffer`] owns three
//! fixed-length buffers and rotates their roles:
//!
//! ```text
//! TripleBuffer
//! ├── past     (read-only during a step; absent before the first step)
//! ├── current  (read-only during a step; the published field)
//! └── future   (exclusively writable during a step)
//!
//! rotate(): past <- current, current <- future, future <- old past
//! ```
//!
//! [`Snapshot`] borrows the current buffer for presentation; [`Frame`] is
//! its owned counterpart for in-memory recording.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod read;
pub mod triple;

pub use error::ArenaError;
pub use read::{Frame, Snapshot};
pub use triple::{StepBuffers, TripleBuffer};
