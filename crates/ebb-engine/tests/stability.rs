//! Integration test: the scheme stays bounded at and below the CFL limit.

use ebb_core::SnapshotAccess;
use ebb_engine::{SimulationConfig, SolverState};
use proptest::prelude::*;

fn undamped(dt: f64) -> SimulationConfig {
    SimulationConfig {
        dt,
        damping: None,
        ..SimulationConfig::default()
    }
}

#[test]
fn courant_one_stays_bounded() {
    let mut solver = SolverState::new(undamped(0.01)).unwrap();
    assert_eq!(solver.courant(), 1.0);
    for _ in 0..60 {
        let max = solver.advance().unwrap().max_abs();
        assert!(max <= 1.0 + 1e-12, "step {}: max |u| = {max}", solver.current_step());
    }
}

#[test]
fn reflection_inverts_the_pulse() {
    // At C = 1 each half travels one cell per step and reflects off the
    // pinned ends with a sign flip.
    let mut solver = SolverState::new(undamped(0.01)).unwrap();
    for _ in 0..100 {
        solver.advance().unwrap();
    }
    let snap = solver.snapshot();
    let u = snap.field();
    let min = u.iter().copied().fold(f64::INFINITY, f64::min);
    assert!(min < -0.9, "min {min}");
    assert!(u[50] < -0.9, "centre {}", u[50]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn stable_courant_stays_bounded(courant in 0.1f64..0.99) {
        let mut solver = SolverState::new(undamped(0.01 * courant)).unwrap();
        let mut worst = 0.0f64;
        for _ in 0..100 {
            worst = worst.max(solver.advance().unwrap().max_abs());
        }
        prop_assert!(worst <= 1.05, "C = {courant}: max |u| = {worst}");
    }
}
