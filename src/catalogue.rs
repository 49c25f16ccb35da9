//! Catalogues
//!
//! An ordered catalogue of building-material line items. Items carrying an
//! eco rate form the decision set; the rest only contribute fixed cost.

use std::fmt;

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors related to line item validation or catalogue access.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// A line item record has no non-eco rate.
    #[error("Line item \"{0}\" has no non-eco rate")]
    MissingNonEcoRate(String),

    /// A rate field is negative.
    #[error("Line item \"{element}\" has a negative {field} of {value}")]
    NegativeRate {
        /// Element name of the offending item
        element: String,
        /// Which rate field was negative
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// The quantity field is negative.
    #[error("Line item \"{element}\" has a negative quantity of {value}")]
    NegativeQuantity {
        /// Element name of the offending item
        element: String,
        /// The offending value
        value: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("Line item \"{element}\" has a non-finite {field}")]
    NonFiniteValue {
        /// Element name of the offending item
        element: String,
        /// Which field was non-finite
        field: &'static str,
    },

    /// An item was not found in the catalogue.
    #[error("Line item {0} not found")]
    ItemNotFound(usize),
}

/// Measurement unit of a line item's quantity.
///
/// Only square-metre quantities feed area accounting and quantity scaling;
/// everything else is costed as a single unit.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum Unit {
    /// Square metres
    #[serde(rename = "sqm")]
    Sqm,

    /// Linear metres
    #[serde(rename = "m")]
    Metre,

    /// Discrete count
    #[serde(rename = "count")]
    Count,
}

impl Unit {
    /// Whether quantities in this unit contribute to the project area.
    #[must_use]
    pub const fn is_area(self) -> bool {
        matches!(self, Unit::Sqm)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Sqm => "sqm",
            Unit::Metre => "m",
            Unit::Count => "count",
        };

        write!(f, "{label}")
    }
}

/// One catalogue entry: a building element priced at a standard (non-eco)
/// rate and, when an alternative exists, an eco rate.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    element: String,
    unit: Unit,
    quantity: f64,
    eco_rate: Option<f64>,
    non_eco_rate: f64,
    carbon_offset: f64,
}

impl LineItem {
    /// Creates a validated line item.
    ///
    /// Quantity and rates must be finite and non-negative; the carbon offset
    /// must be finite but may carry any sign.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogueError`] if any field fails validation.
    pub fn new(
        element: impl Into<String>,
        unit: Unit,
        quantity: f64,
        eco_rate: Option<f64>,
        non_eco_rate: f64,
        carbon_offset: f64,
    ) -> Result<Self, CatalogueError> {
        let element = element.into();

        ensure_finite(&element, "quantity", quantity)?;
        ensure_finite(&element, "non-eco rate", non_eco_rate)?;
        ensure_finite(&element, "carbon offset", carbon_offset)?;

        if quantity < 0.0 {
            return Err(CatalogueError::NegativeQuantity {
                element,
                value: quantity,
            });
        }

        ensure_rate(&element, "non-eco rate", non_eco_rate)?;

        if let Some(rate) = eco_rate {
            ensure_finite(&element, "eco rate", rate)?;
            ensure_rate(&element, "eco rate", rate)?;
        }

        Ok(Self {
            element,
            unit,
            quantity,
            eco_rate,
            non_eco_rate,
            carbon_offset,
        })
    }

    /// Descriptive element name of the item.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Measurement unit of the item's quantity.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Amount of this element in the project.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Unit cost of the eco variant, when one exists.
    pub fn eco_rate(&self) -> Option<f64> {
        self.eco_rate
    }

    /// Unit cost of the standard variant.
    pub fn non_eco_rate(&self) -> f64 {
        self.non_eco_rate
    }

    /// Carbon benefit of choosing the eco variant for this item.
    pub fn carbon_offset(&self) -> f64 {
        self.carbon_offset
    }

    /// Whether this item offers an eco alternative and so carries a decision.
    #[must_use]
    pub const fn offers_eco(&self) -> bool {
        self.eco_rate.is_some()
    }

    /// Factor applied when turning a unit rate into a cost: the quantity for
    /// area items, a single unit for everything else.
    #[must_use]
    pub fn cost_multiplier(&self) -> f64 {
        if self.unit.is_area() { self.quantity } else { 1.0 }
    }
}

fn ensure_finite(element: &str, field: &'static str, value: f64) -> Result<(), CatalogueError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CatalogueError::NonFiniteValue {
            element: element.to_string(),
            field,
        })
    }
}

fn ensure_rate(element: &str, field: &'static str, value: f64) -> Result<(), CatalogueError> {
    if value < 0.0 {
        return Err(CatalogueError::NegativeRate {
            element: element.to_string(),
            field,
            value,
        });
    }

    Ok(())
}

/// Ordered catalogue of line items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalogue {
    items: SmallVec<[LineItem; 10]>,
}

impl Catalogue {
    /// Create a catalogue from an ordered sequence of line items.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Iterate over the items in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Get an item by its catalogue index.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::ItemNotFound`] if the index is out of range.
    pub fn get(&self, item: usize) -> Result<&LineItem, CatalogueError> {
        self.items.get(item).ok_or(CatalogueError::ItemNotFound(item))
    }

    /// Number of items in the catalogue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalogue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total project area: the sum of quantities over square-metre items
    /// across the whole catalogue, decision set or not.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.unit().is_area())
            .map(LineItem::quantity)
            .sum()
    }

    /// Iterate over the decision set: items offering an eco variant, paired
    /// with their catalogue index, in catalogue order.
    pub fn decision_items(&self) -> impl Iterator<Item = (usize, &LineItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.offers_eco())
    }
}

impl FromIterator<LineItem> for Catalogue {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}
