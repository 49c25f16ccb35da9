//! Eco-Selection Model
//!
//! Turns a catalogue and budget into decision variables, a maximise
//! objective, and the blended-rate budget constraint.

use std::fmt;

use good_lp::{Expression, ProblemVariables, Variable, variable};
use smallvec::SmallVec;

use crate::{budget::Budget, catalogue::Catalogue};

/// Ordered binary decision variables, one per catalogue item in the decision
/// set, paired with the item's catalogue index.
pub type DecisionVars = SmallVec<[(usize, Variable); 10]>;

/// Binary selection model over a catalogue's decision set.
///
/// Each item offering an eco variant gets one binary variable `x_i`
/// (1 = choose the eco variant). The objective maximises
/// `Σ carbon_offset_i · x_i`; the budget constraint bounds the blended
/// per-unit rate sum `Σ (eco_i · x_i + non_eco_i · (1 − x_i)) ≤ limit`.
///
/// The constraint is held in the rearranged form
/// `Σ (eco_i − non_eco_i) · x_i ≤ limit − Σ non_eco_i`, which is the same
/// inequality with the constant term moved to the right-hand side so the
/// stored expression contains only decision variables.
pub struct EcoModel {
    variables: ProblemVariables,
    objective: Expression,
    upgrade: Expression,
    budget_rhs: f64,
    decisions: DecisionVars,
}

impl fmt::Debug for EcoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcoModel")
            .field("variables", &"<ProblemVariables>")
            .field("objective", &"<Expression>")
            .field("upgrade", &"<Expression>")
            .field("budget_rhs", &self.budget_rhs)
            .field("decisions", &format!("[{} decisions]", self.decisions.len()))
            .finish()
    }
}

impl EcoModel {
    /// Build the selection model for a catalogue under the given budget.
    ///
    /// Items without an eco rate are skipped entirely: they carry no
    /// variable and contribute to neither the objective nor the constraint.
    #[must_use]
    pub fn build(catalogue: &Catalogue, budget: &Budget) -> Self {
        let mut variables = ProblemVariables::new();
        let mut objective = Expression::default();
        let mut upgrade = Expression::default();
        let mut baseline_rate_sum = 0.0;
        let mut decisions = DecisionVars::new();

        for (item_idx, item) in catalogue.decision_items() {
            let Some(eco_rate) = item.eco_rate() else {
                continue;
            };

            let x = variables.add(variable().binary());

            objective += x * item.carbon_offset();
            upgrade += x * (eco_rate - item.non_eco_rate());
            baseline_rate_sum += item.non_eco_rate();

            decisions.push((item_idx, x));
        }

        Self {
            variables,
            objective,
            upgrade,
            budget_rhs: budget.limit() - baseline_rate_sum,
            decisions,
        }
    }

    /// Whether the decision set is empty.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// The decision variables in catalogue order.
    pub fn decisions(&self) -> &[(usize, Variable)] {
        &self.decisions
    }

    /// The maximise objective: total carbon offset of the chosen variants.
    pub fn objective(&self) -> &Expression {
        &self.objective
    }

    /// Left-hand side of the rearranged budget constraint.
    pub fn upgrade(&self) -> &Expression {
        &self.upgrade
    }

    /// Right-hand side of the rearranged budget constraint.
    pub fn budget_rhs(&self) -> f64 {
        self.budget_rhs
    }

    /// Consume the model, handing its pieces to a solver backend.
    pub fn into_parts(self) -> (ProblemVariables, Expression, Expression, f64, DecisionVars) {
        (
            self.variables,
            self.objective,
            self.upgrade,
            self.budget_rhs,
            self.decisions,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use good_lp::Solution;
    use testresult::TestResult;

    use crate::catalogue::{CatalogueError, LineItem, Unit};

    use super::*;

    fn catalogue() -> Result<Catalogue, CatalogueError> {
        Ok(Catalogue::from_items([
            LineItem::new("Wall", Unit::Sqm, 100.0, Some(12.0), 10.0, 50.0)?,
            LineItem::new("Roof", Unit::Sqm, 50.0, Some(30.0), 20.0, 80.0)?,
            LineItem::new("Door", Unit::Count, 5.0, None, 15.0, 0.0)?,
        ]))
    }

    fn all_ones(decisions: &[(usize, Variable)]) -> HashMap<Variable, f64> {
        decisions.iter().map(|&(_, var)| (var, 1.0)).collect()
    }

    fn all_zeros(decisions: &[(usize, Variable)]) -> HashMap<Variable, f64> {
        decisions.iter().map(|&(_, var)| (var, 0.0)).collect()
    }

    #[test]
    fn build_creates_one_variable_per_decision_item() -> TestResult {
        let catalogue = catalogue()?;
        let budget = Budget::derive(&catalogue, 25.0)?;

        let model = EcoModel::build(&catalogue, &budget);

        let indexes: Vec<usize> = model.decisions().iter().map(|&(idx, _)| idx).collect();

        assert_eq!(indexes, vec![0, 1]);
        assert!(!model.is_empty());

        Ok(())
    }

    #[test]
    fn objective_evaluates_to_sum_of_chosen_offsets() -> TestResult {
        let catalogue = catalogue()?;
        let budget = Budget::derive(&catalogue, 25.0)?;

        let model = EcoModel::build(&catalogue, &budget);

        let everything_eco = all_ones(model.decisions());
        let nothing_eco = all_zeros(model.decisions());

        assert!((everything_eco.eval(model.objective()) - 130.0).abs() <= f64::EPSILON);
        assert!(nothing_eco.eval(model.objective()).abs() <= f64::EPSILON);

        Ok(())
    }

    #[test]
    fn constraint_matches_blended_rate_form() -> TestResult {
        let catalogue = catalogue()?;
        let budget = Budget::derive(&catalogue, 25.0)?;

        let model = EcoModel::build(&catalogue, &budget);

        // All-eco: lhs = (12-10) + (30-20) = 12, rhs = 3750 - (10+20) = 3720.
        // Equivalent to the unrearranged 12 + 30 = 42 ≤ 3750.
        let everything_eco = all_ones(model.decisions());

        assert!((everything_eco.eval(model.upgrade()) - 12.0).abs() <= f64::EPSILON);
        assert!((model.budget_rhs() - 3720.0).abs() <= f64::EPSILON);

        // All-non-eco: lhs = 0 ≤ rhs whenever Σ non_eco ≤ limit.
        let nothing_eco = all_zeros(model.decisions());

        assert!(nothing_eco.eval(model.upgrade()).abs() <= f64::EPSILON);

        Ok(())
    }

    #[test]
    fn fixed_items_contribute_nothing() -> TestResult {
        let catalogue = Catalogue::from_items([
            LineItem::new("Slab", Unit::Sqm, 10.0, None, 9.0, 40.0)?,
            LineItem::new("Door", Unit::Count, 2.0, None, 15.0, 0.0)?,
        ]);

        let budget = Budget::derive(&catalogue, 25.0)?;
        let model = EcoModel::build(&catalogue, &budget);

        assert!(model.is_empty());
        assert_eq!(model.budget_rhs(), budget.limit());

        Ok(())
    }
}
