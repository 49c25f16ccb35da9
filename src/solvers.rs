//! Solvers for Eco-Variant Selection
//!
//! The solver contract: a backend takes a catalogue and budget, solves the
//! binary selection model, and yields either a reconstructed report or a
//! no-solution outcome carrying the raw backend status.

use std::fmt;

use thiserror::Error;

use crate::{
    budget::Budget,
    catalogue::{Catalogue, CatalogueError},
    report::{ReportError, SolutionReport},
};

pub mod milp;

/// Binary threshold for determining truthiness of a relaxed binary variable.
pub const BINARY_THRESHOLD: f64 = 0.5;

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// Wrapped catalogue access error.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Wrapped report reconstruction error.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Terminal status of a solve that produced no optimal assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// No assignment satisfies the budget constraint.
    Infeasible,

    /// The backend reported an unbounded, unknown or error state.
    Other {
        /// Diagnostic text from the backend.
        detail: String,
    },
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Other { detail } => write!(f, "{detail}"),
        }
    }
}

/// Outcome of one solver run.
///
/// Non-optimality is an expected terminal state (an over-tight budget is a
/// normal input), so it is carried here rather than as a [`SolverError`].
#[derive(Clone, Debug, PartialEq)]
pub enum SolveOutcome {
    /// An optimal assignment was found and reconstructed.
    Optimal(SolutionReport),

    /// The solve terminated without an optimal assignment.
    NoSolution {
        /// Raw solver status, kept for diagnostics.
        status: SolveStatus,
    },
}

impl SolveOutcome {
    /// The report, when the run was optimal.
    #[must_use]
    pub const fn report(&self) -> Option<&SolutionReport> {
        match self {
            SolveOutcome::Optimal(report) => Some(report),
            SolveOutcome::NoSolution { .. } => None,
        }
    }

    /// Whether the run found an optimal assignment.
    #[must_use]
    pub const fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }
}

/// Trait for solving the eco-variant selection problem over a catalogue.
///
/// Implementations must solve the binary model exactly (or to certified
/// optimality) and be deterministic in the attained objective value for a
/// fixed input; tie-breaking between equally optimal assignments is
/// backend-defined.
pub trait Solver {
    /// Solve the selection problem for the given catalogue and budget.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] only for reconstruction failures; an
    /// infeasible or otherwise unsolved model is reported through
    /// [`SolveOutcome::NoSolution`].
    fn solve(catalogue: &Catalogue, budget: &Budget) -> Result<SolveOutcome, SolverError>;
}
