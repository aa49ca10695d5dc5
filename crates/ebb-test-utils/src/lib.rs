//! Test utilities and fixtures for ebb development.
//!
//! Provides seeded random fields, bitwise field comparison and the
//! reference grid, plus the pipeline stages in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstPropagator, FailingPropagator, ScalePropagator};

use ebb_space::SpatialGrid;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The `[0, 1]` grid with `dx = 0.01` (101 points).
pub fn reference_grid() -> SpatialGrid {
    SpatialGrid::new(0.0, 1.0, 0.01).expect("reference grid is valid")
}

/// `len` values uniformly drawn from `[-amplitude, amplitude)`.
///
/// Same seed, same field, on every platform.
pub fn random_field(seed: u64, len: usize, amplitude: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            // 53 high bits -> [0, 1)
            let unit = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}

/// Whether two fields are identical bit for bit (`-0.0 != 0.0`, equal
/// NaN payloads match).
pub fn bitwise_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

/// Panic with the first differing index unless `a` and `b` are
/// bitwise identical.
#[track_caller]
pub fn assert_bitwise_eq(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len(), "field lengths differ");
    if let Some(i) = a
        .iter()
        .zip(b)
        .position(|(x, y)| x.to_bits() != y.to_bits())
    {
        panic!("fields differ at {i}: {} vs {}", a[i], b[i]);
    }
}
