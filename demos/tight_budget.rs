//! Tight Budget Example
//!
//! Runs the four-bedroom house catalogue against a target build rate of
//! £0.25 per square metre. The derived budget falls below the sum of the
//! non-eco rates, so no assignment is feasible and the run ends with a
//! no-solution outcome rather than an error.
//!
//! Run with: `cargo run --example tight_budget`

use anyhow::Result;

use verdant::{
    budget::Budget,
    fixtures::Fixture,
    solvers::{SolveOutcome, Solver, milp::MilpSolver},
};

/// Tight Budget Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let catalogue = Fixture::from_set("four_bed")?;
    let budget = Budget::derive(&catalogue, 0.25)?;

    println!(
        "Budget: £{:.2} over {:.0} sqm",
        budget.limit(),
        budget.total_area()
    );

    match MilpSolver::solve(&catalogue, &budget)? {
        SolveOutcome::Optimal(report) => {
            println!("Unexpectedly optimal: {:.2} kg offset", report.optimal_offset());
        }
        SolveOutcome::NoSolution { status } => {
            println!("No optimal allocation exists under this budget ({status})");
        }
    }

    Ok(())
}
