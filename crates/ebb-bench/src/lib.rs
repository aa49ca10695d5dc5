//! Benchmark profiles for the ebb wave solver.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 101 points on `[0, 1]`, Courant number 0.5
//! - [`fine_profile`]: 10 001 points on the same domain and Courant number

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ebb_engine::{DampingConfig, SimulationConfig};

/// The reference scenario: `dx = 0.01`, `dt = 0.005`, 7-point damping.
pub fn reference_profile() -> SimulationConfig {
    SimulationConfig::default()
}

/// The reference scenario refined 100x in space and time.
///
/// The damping zone scales with the grid so it spans the same fraction
/// of the domain.
pub fn fine_profile() -> SimulationConfig {
    SimulationConfig {
        dx: 1e-4,
        dt: 5e-5,
        damping: Some(DampingConfig {
            width: 700,
            ..DampingConfig::default()
        }),
        ..SimulationConfig::default()
    }
}
