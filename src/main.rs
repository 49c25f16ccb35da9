//! Verdant CLI
//!
//! Loads a catalogue fixture set, derives the budget from the target build
//! rate, solves the eco-variant selection problem and prints the report.

use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use clap::Parser;

use verdant::{
    budget::Budget,
    fixtures::Fixture,
    solvers::{SolveOutcome, Solver, milp::MilpSolver},
};

/// Select eco variants from a building-material catalogue to maximise
/// carbon offset within a target build rate.
#[derive(Debug, Parser)]
#[command(name = "verdant", about = "Eco-variant selection for building-material catalogues", long_about = None)]
struct Cli {
    /// Name of a catalogue set under the fixtures directory
    set: String,

    /// Target price per square metre used to derive the budget
    #[arg(long, default_value_t = 25.0)]
    target_rate: f64,

    /// Base directory holding catalogue fixture files
    #[arg(long, default_value = "./fixtures")]
    fixtures: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let catalogue = Fixture::with_base_path(cli.fixtures).load_catalogue(&cli.set)?;
    let budget = Budget::derive(&catalogue, cli.target_rate)?;

    let start = Instant::now();
    let outcome = MilpSolver::solve(&catalogue, &budget)?;
    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match outcome {
        SolveOutcome::Optimal(report) => {
            report.write_to(&mut handle, &catalogue)?;

            writeln!(handle, "\nSolution: {elapsed}s")?;
        }
        SolveOutcome::NoSolution { status } => {
            writeln!(
                handle,
                "No optimal allocation exists under this budget ({status})"
            )?;
        }
    }

    Ok(())
}
