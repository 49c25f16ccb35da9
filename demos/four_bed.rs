//! Four-Bed House Example
//!
//! Optimises the bundled four-bedroom house catalogue against the default
//! target build rate of £25 per square metre. At that rate the budget is
//! generous, so every eco variant is selected.
//!
//! Run with: `cargo run --example four_bed`

use std::{io, time::Instant};

use anyhow::Result;

use verdant::{
    budget::Budget,
    fixtures::Fixture,
    solvers::{SolveOutcome, Solver, milp::MilpSolver},
};

/// Four-Bed House Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let catalogue = Fixture::from_set("four_bed")?;
    let budget = Budget::derive(&catalogue, 25.0)?;

    let start = Instant::now();

    let outcome = MilpSolver::solve(&catalogue, &budget)?;

    let elapsed = start.elapsed().as_secs_f32();

    match outcome {
        SolveOutcome::Optimal(report) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();

            report.write_to(&mut handle, &catalogue)?;
        }
        SolveOutcome::NoSolution { status } => {
            println!("No optimal allocation exists under this budget ({status})");
        }
    }

    println!("\nSolution: {elapsed}s");

    Ok(())
}
