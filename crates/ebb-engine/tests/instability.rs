//! Integration test: instability guard and stage failure roll back.
//!
//! A failed step must leave the published field and the step index
//! exactly as they were, and the error must name the cause.

use ebb_core::{SnapshotAccess, StepError, StepIndex};
use ebb_engine::{SimulationConfig, SolverState};
use ebb_propagator::Propagator;
use ebb_propagators::Leapfrog;
use ebb_test_utils::{assert_bitwise_eq, FailingPropagator, ScalePropagator};

fn leapfrog(limit: f64) -> Box<dyn Propagator> {
    Box::new(Leapfrog::builder().stability_limit(limit).build().unwrap())
}

fn guarded(threshold: f64) -> SimulationConfig {
    SimulationConfig {
        damping: None,
        instability_threshold: Some(threshold),
        ..SimulationConfig::default()
    }
}

#[test]
fn growth_trips_guard_and_rolls_back() {
    let stages: Vec<Box<dyn Propagator>> =
        vec![leapfrog(1.0), Box::new(ScalePropagator::new("amplify", 1.2))];
    let mut solver = SolverState::with_stages(guarded(10.0), stages).unwrap();

    let err = loop {
        let before = solver.snapshot().to_frame();
        match solver.advance().map(|_| ()) {
            Ok(()) => continue,
            Err(e) => {
                assert_eq!(solver.current_step(), before.step);
                assert_bitwise_eq(solver.snapshot().field(), &before.field);
                break e;
            }
        }
    };
    match err {
        StepError::NumericalInstability {
            step,
            value,
            threshold,
            ..
        } => {
            assert_eq!(step, solver.current_step().next());
            assert!(value.abs() > threshold);
            assert_eq!(threshold, 10.0);
        }
        other => panic!("expected NumericalInstability, got {other:?}"),
    }
    assert_eq!(solver.rollback_count(), 1);

    // Retrying hits the same wall.
    assert!(solver.advance().is_err());
    assert_eq!(solver.rollback_count(), 2);
}

#[test]
fn supercritical_courant_blows_up() {
    let config = SimulationConfig {
        dt: 0.015,
        ..guarded(1e3)
    };
    let mut solver = SolverState::with_stages(config, vec![leapfrog(2.0)]).unwrap();
    assert!(solver.courant() > 1.0);

    let mut tripped = None;
    for _ in 0..500 {
        if let Err(e) = solver.advance() {
            tripped = Some(e);
            break;
        }
    }
    assert!(
        matches!(tripped, Some(StepError::NumericalInstability { .. })),
        "no blow-up by step {}",
        solver.current_step()
    );
}

#[test]
fn stage_failure_names_stage() {
    let stages: Vec<Box<dyn Propagator>> =
        vec![leapfrog(1.0), Box::new(FailingPropagator::new("flaky", 3))];
    let mut solver = SolverState::with_stages(guarded(10.0), stages).unwrap();
    for _ in 0..3 {
        solver.advance().unwrap();
    }
    let before = solver.snapshot().to_frame();

    let err = solver.advance().unwrap_err();
    assert!(
        matches!(&err, StepError::PropagatorFailed { name, .. } if name == "flaky"),
        "{err:?}"
    );
    // The NaN scribbled into the future buffer never surfaces.
    assert_eq!(solver.current_step(), StepIndex(3));
    assert_bitwise_eq(solver.snapshot().field(), &before.field);
    assert!(solver.snapshot().field().iter().all(|v| v.is_finite()));
}
