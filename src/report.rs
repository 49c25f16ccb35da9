//! Solution Reports
//!
//! Reconstruction of a solved assignment into cost and offset summaries,
//! plus console rendering of the selection.

use std::io;

use good_lp::{Solution, Variable};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    catalogue::{Catalogue, CatalogueError},
    solvers::BINARY_THRESHOLD,
};

/// Errors that can occur when reconstructing or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The catalogue has zero square-metre area, so the achieved rate per
    /// area is undefined.
    #[error("Catalogue has zero square-metre area; rate per area is undefined")]
    ZeroArea,

    /// Wrapped catalogue access error.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// IO error while writing the report.
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Read-only summary of one optimal solve.
///
/// Carries two distinct cost views: `total_rate` sums the realised per-unit
/// rates without quantity scaling, mirroring the budget constraint, while
/// `baseline_cost` and `optimized_cost` scale area items by their quantity
/// for the before/after comparison. Neither substitutes for the other.
#[derive(Clone, Debug, PartialEq)]
pub struct SolutionReport {
    optimal_offset: f64,
    total_rate: f64,
    rate_per_area: f64,
    baseline_cost: f64,
    optimized_cost: f64,
    chosen: SmallVec<[usize; 10]>,
}

impl SolutionReport {
    /// Reconstruct the report from a solved assignment.
    ///
    /// Pure: reads the catalogue and the assignment, performs no further
    /// optimisation. Decision variables are read with their raw fractional
    /// values in the cost sums; the [`BINARY_THRESHOLD`] applies only when
    /// deciding which items count as chosen.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ZeroArea`] when the catalogue has no
    /// square-metre area, and [`ReportError::Catalogue`] if a decision index
    /// does not resolve to a catalogue item.
    pub fn from_assignment(
        catalogue: &Catalogue,
        optimal_offset: f64,
        solution: &impl Solution,
        decisions: &[(usize, Variable)],
    ) -> Result<Self, ReportError> {
        let total_area = catalogue.total_area();

        if total_area == 0.0 {
            return Err(ReportError::ZeroArea);
        }

        let mut total_rate = 0.0;
        let mut baseline_cost = 0.0;
        let mut optimized_cost = 0.0;
        let mut chosen: SmallVec<[usize; 10]> = SmallVec::new();

        for &(item_idx, var) in decisions {
            let item = catalogue.get(item_idx)?;

            // Only decision items carry a variable; anything else in the
            // list is a caller mistake and contributes nothing.
            let Some(eco_rate) = item.eco_rate() else {
                continue;
            };

            let x = solution.value(var);
            let blended_rate = eco_rate * x + item.non_eco_rate() * (1.0 - x);

            total_rate += blended_rate;
            baseline_cost += item.non_eco_rate() * item.cost_multiplier();
            optimized_cost += blended_rate * item.cost_multiplier();

            if x > BINARY_THRESHOLD {
                chosen.push(item_idx);
            }
        }

        Ok(Self {
            optimal_offset,
            total_rate,
            rate_per_area: total_rate / total_area,
            baseline_cost,
            optimized_cost,
            chosen,
        })
    }

    /// Report for a catalogue whose decision set is empty: zero offset,
    /// zero decision cost, nothing chosen.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ZeroArea`] when the catalogue has no
    /// square-metre area.
    pub fn trivial(catalogue: &Catalogue) -> Result<Self, ReportError> {
        if catalogue.total_area() == 0.0 {
            return Err(ReportError::ZeroArea);
        }

        Ok(Self {
            optimal_offset: 0.0,
            total_rate: 0.0,
            rate_per_area: 0.0,
            baseline_cost: 0.0,
            optimized_cost: 0.0,
            chosen: SmallVec::new(),
        })
    }

    /// Total carbon offset attained by the chosen eco variants.
    pub fn optimal_offset(&self) -> f64 {
        self.optimal_offset
    }

    /// Sum of the realised per-unit rates over the decision set, without
    /// quantity scaling. Mirrors the budget constraint.
    pub fn total_rate(&self) -> f64 {
        self.total_rate
    }

    /// Achieved build rate: `total_rate` divided by the total area.
    pub fn rate_per_area(&self) -> f64 {
        self.rate_per_area
    }

    /// Quantity-scaled cost of the decision set had every item stayed
    /// non-eco.
    pub fn baseline_cost(&self) -> f64 {
        self.baseline_cost
    }

    /// Quantity-scaled cost of the decision set under the solved assignment.
    pub fn optimized_cost(&self) -> f64 {
        self.optimized_cost
    }

    /// Catalogue indexes of the items whose eco variant was chosen, in
    /// catalogue order.
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// Iterate over the chosen line items in catalogue order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::ItemNotFound`] if the report was built
    /// against a different catalogue.
    pub fn chosen_items<'a>(
        &self,
        catalogue: &'a Catalogue,
    ) -> Result<SmallVec<[&'a crate::catalogue::LineItem; 10]>, CatalogueError> {
        self.chosen.iter().map(|&idx| catalogue.get(idx)).collect()
    }

    /// Write the report to the given sink: a table of the selected eco
    /// options followed by the cost and offset summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if a chosen index does not resolve or the
    /// sink fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalogue: &Catalogue,
    ) -> Result<(), ReportError> {
        if self.chosen.is_empty() {
            writeln!(out, "\nSelected eco options: (none)")?;
        } else {
            let table = self.build_selection_table(catalogue)?;

            writeln!(out, "\nSelected eco options:\n{table}")?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Previous (all non-eco) total cost: £{:.2}",
            self.baseline_cost
        )?;
        writeln!(
            out,
            "New optimised total cost:          £{:.2}",
            self.optimized_cost
        )?;
        writeln!(
            out,
            "Optimal carbon offset:             {:.2} kg",
            self.optimal_offset
        )?;
        writeln!(
            out,
            "Achieved build rate:               £{:.2} per sqm",
            self.rate_per_area
        )?;

        Ok(())
    }

    fn build_selection_table(&self, catalogue: &Catalogue) -> Result<String, ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Element", "Units", "Quantity", "Eco Rate", "Carbon Offset"]);

        for (n, &item_idx) in self.chosen.iter().enumerate() {
            let item = catalogue.get(item_idx)?;

            builder.push_record([
                format!("#{:<3}", n + 1),
                item.element().to_string(),
                item.unit().to_string(),
                format!("{:.2}", item.quantity()),
                item.eco_rate()
                    .map_or_else(String::new, |rate| format!("{rate:.2}")),
                format!("{:.2}", item.carbon_offset()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..), Alignment::right());

        Ok(table.to_string())
    }
}
