//! Gaussian pulse: the reference scenario rendered to the terminal.
//!
//! Demonstrates:
//!   1. Building a SimulationConfig (defaults are the reference run)
//!   2. Driving the solver with a Presenter
//!   3. Reading per-step metrics
//!
//! Run with:
//!   RUST_LOG=info cargo run --example gaussian_pulse

use ebb_arena::Snapshot;
use ebb_core::SnapshotAccess;
use ebb_engine::{Presenter, SimulationConfig, SolverState};

// ─── Rendering ──────────────────────────────────────────────────

const WIDTH: usize = 101;
const ROWS: usize = 11;
const EVERY: u64 = 20;

/// Prints a coarse ASCII plot of the field every `EVERY` steps.
struct AsciiPlot;

impl Presenter for AsciiPlot {
    fn present(&mut self, snapshot: &Snapshot<'_>) {
        if snapshot.step().0 % EVERY != 0 {
            return;
        }
        println!(
            "t = {:.3}  (step {}, max |u| = {:.4})",
            snapshot.time(),
            snapshot.step(),
            snapshot.max_abs()
        );
        let field = snapshot.field();
        // Rows span u in [-1, 1], top row is +1.
        for row in 0..ROWS {
            let level = 1.0 - 2.0 * row as f64 / (ROWS - 1) as f64;
            let line: String = field
                .iter()
                .take(WIDTH)
                .map(|&u| {
                    let cell = ((1.0 - u) / 2.0 * (ROWS - 1) as f64).round() as usize;
                    if cell == row {
                        '*'
                    } else if level.abs() < 1e-9 {
                        '-'
                    } else {
                        ' '
                    }
                })
                .collect();
            println!("|{line}|");
        }
        println!();
    }
}

fn main() {
    env_logger::init();

    let mut solver = match SolverState::new(SimulationConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let remaining = solver.params().step_count() - 1;
    let mut plot = AsciiPlot;
    plot.present(&solver.snapshot());
    if let Err(e) = solver.drive(&mut plot, remaining) {
        eprintln!("step failed: {e}");
        std::process::exit(1);
    }

    let m = solver.last_metrics();
    println!(
        "finished at t = {:.3} after {} steps; last step {} us ({} us in stages)",
        solver.time(),
        m.step,
        m.total_us,
        m.pipeline_us()
    );
}
