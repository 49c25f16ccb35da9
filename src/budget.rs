//! Budgets
//!
//! The spend ceiling for a run: a target build rate multiplied by the
//! catalogue's total square-metre area.

use thiserror::Error;

use crate::catalogue::Catalogue;

/// Errors raised while deriving a budget.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The target rate is negative, NaN or infinite.
    #[error("Target rate per square metre must be finite and non-negative, got {0}")]
    InvalidTargetRate(f64),

    /// The catalogue has no positive square-metre area, so the derived
    /// budget would be meaningless.
    #[error("Catalogue has no positive square-metre area; budget is degenerate")]
    DegenerateArea,
}

/// Derived spend ceiling for one optimisation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Budget {
    total_area: f64,
    target_rate: f64,
    limit: f64,
}

impl Budget {
    /// Derive the budget from a catalogue and a target price per square
    /// metre: `limit = target_rate × total_area`.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InvalidTargetRate`] for a negative or
    /// non-finite target rate, and [`BudgetError::DegenerateArea`] when the
    /// catalogue's square-metre quantities do not sum to a positive area.
    pub fn derive(catalogue: &Catalogue, target_rate: f64) -> Result<Self, BudgetError> {
        if !target_rate.is_finite() || target_rate < 0.0 {
            return Err(BudgetError::InvalidTargetRate(target_rate));
        }

        let total_area = catalogue.total_area();

        if total_area <= 0.0 {
            return Err(BudgetError::DegenerateArea);
        }

        Ok(Self {
            total_area,
            target_rate,
            limit: target_rate * total_area,
        })
    }

    /// Total square-metre area the budget was derived from.
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Target price per square metre.
    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// The spend ceiling applied to the blended-rate constraint.
    pub fn limit(&self) -> f64 {
        self.limit
    }
}
