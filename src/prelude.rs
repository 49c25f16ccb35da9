//! Verdant prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    budget::{Budget, BudgetError},
    catalogue::{Catalogue, CatalogueError, LineItem, Unit},
    fixtures::{Fixture, FixtureError, LineItemRecord},
    model::{DecisionVars, EcoModel},
    report::{ReportError, SolutionReport},
    solvers::{
        BINARY_THRESHOLD, SolveOutcome, SolveStatus, Solver, SolverError, milp::MilpSolver,
    },
};
