//! MILP Solver

use good_lp::{ResolutionError, Solution, SolverModel};

#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;

use crate::{
    budget::Budget,
    catalogue::Catalogue,
    model::EcoModel,
    report::SolutionReport,
    solvers::{SolveOutcome, SolveStatus, Solver, SolverError},
};

/// Solver using Mixed Integer Linear Programming (MILP)
#[derive(Debug)]
pub struct MilpSolver;

impl Solver for MilpSolver {
    fn solve(catalogue: &Catalogue, budget: &Budget) -> Result<SolveOutcome, SolverError> {
        let model = EcoModel::build(catalogue, budget);

        // With no eco alternatives there is nothing to decide: the empty
        // assignment is optimal with zero offset. Skip the backend entirely.
        if model.is_empty() {
            return Ok(SolveOutcome::Optimal(SolutionReport::trivial(catalogue)?));
        }

        let (variables, objective, upgrade, budget_rhs, decisions) = model.into_parts();

        let problem = variables
            .maximise(objective.clone())
            .using(default_solver)
            .with(upgrade.leq(budget_rhs));

        match problem.solve() {
            Ok(solution) => {
                let optimal_offset = solution.eval(&objective);

                let report = SolutionReport::from_assignment(
                    catalogue,
                    optimal_offset,
                    &solution,
                    &decisions,
                )?;

                Ok(SolveOutcome::Optimal(report))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::NoSolution {
                status: SolveStatus::Infeasible,
            }),
            Err(err) => Ok(SolveOutcome::NoSolution {
                status: SolveStatus::Other {
                    detail: err.to_string(),
                },
            }),
        }
    }
}
