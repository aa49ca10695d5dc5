//! Integration test: runs are bitwise reproducible.

use ebb_arena::Frame;
use ebb_engine::{DampingConfig, SimulationConfig, SolverState};
use ebb_propagators::RightZone;
use ebb_test_utils::assert_bitwise_eq;
use proptest::prelude::*;

fn run(config: SimulationConfig) -> Vec<Frame> {
    SolverState::new(config).unwrap().record(1).unwrap()
}

fn assert_same_run(a: &[Frame], b: &[Frame]) {
    assert_eq!(a.len(), b.len());
    for (fa, fb) in a.iter().zip(b) {
        assert_eq!(fa.step, fb.step);
        assert_bitwise_eq(&fa.field, &fb.field);
    }
}

#[test]
fn same_config_same_bits() {
    let a = run(SimulationConfig::default());
    let b = run(SimulationConfig::default());
    assert_eq!(a.len(), 201);
    assert_same_run(&a, &b);
}

#[test]
fn mirror_zone_is_reproducible() {
    let config = || SimulationConfig {
        damping: Some(DampingConfig {
            right_zone: RightZone::Mirror,
            ..DampingConfig::default()
        }),
        ..SimulationConfig::default()
    };
    assert_same_run(&run(config()), &run(config()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn zero_width_damping_matches_undamped(
        strength in prop_oneof![Just(0.0), 0.0f64..10.0, Just(1e6)],
        right_zone in prop_oneof![Just(RightZone::Broadcast), Just(RightZone::Mirror)],
    ) {
        let zero_width = run(SimulationConfig {
            damping: Some(DampingConfig {
                width: 0,
                strength,
                right_zone,
            }),
            ..SimulationConfig::default()
        });
        let undamped = run(SimulationConfig {
            damping: None,
            ..SimulationConfig::default()
        });
        assert_same_run(&zero_width, &undamped);
    }
}

#[test]
fn reset_midway_replays() {
    let mut solver = SolverState::new(SimulationConfig::default()).unwrap();
    for _ in 0..37 {
        solver.advance().unwrap();
    }
    solver.reset().unwrap();
    let replay = solver.record(1).unwrap();
    assert_same_run(&replay, &run(SimulationConfig::default()));
}
