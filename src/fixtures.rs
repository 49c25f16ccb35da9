//! Fixtures
//!
//! YAML catalogue fixture loading. Raw records are validated once here,
//! on their way into the domain types.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::catalogue::{Catalogue, CatalogueError, LineItem, Unit};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid line item record
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// Raw line item record as written in catalogue fixture files.
///
/// Both rates are optional at this stage: a missing eco rate means the item
/// has no eco alternative, while a missing non-eco rate is invalid and is
/// rejected during conversion.
#[derive(Debug, Deserialize)]
pub struct LineItemRecord {
    /// Descriptive element name
    pub element: String,

    /// Measurement unit of the quantity
    pub units: Unit,

    /// Amount of this element in the project
    pub quantity: f64,

    /// Unit cost of the eco variant, when one exists
    #[serde(default)]
    pub eco_rate: Option<f64>,

    /// Unit cost of the standard variant
    #[serde(default)]
    pub non_eco_rate: Option<f64>,

    /// Carbon benefit of choosing the eco variant
    #[serde(default)]
    pub carbon_offset: f64,
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    catalogue: Vec<LineItemRecord>,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = CatalogueError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        let non_eco_rate = record
            .non_eco_rate
            .ok_or_else(|| CatalogueError::MissingNonEcoRate(record.element.clone()))?;

        LineItem::new(
            record.element,
            record.units,
            record.quantity,
            record.eco_rate,
            non_eco_rate,
            record.carbon_offset,
        )
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a catalogue from `<base>/catalogues/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// record fails validation.
    pub fn load_catalogue(&self, name: &str) -> Result<Catalogue, FixtureError> {
        let file_path = self
            .base_path
            .join("catalogues")
            .join(format!("{name}.yml"));

        Self::load_catalogue_file(file_path)
    }

    /// Load a catalogue from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// record fails validation.
    pub fn load_catalogue_file(path: impl AsRef<Path>) -> Result<Catalogue, FixtureError> {
        let contents = fs::read_to_string(path)?;
        let file: CatalogueFile = serde_norway::from_str(&contents)?;

        let items = file
            .catalogue
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalogue::from_items(items))
    }

    /// Load the named catalogue set from the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the set cannot be loaded.
    pub fn from_set(name: &str) -> Result<Catalogue, FixtureError> {
        Self::new().load_catalogue(name)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    fn write_catalogue(dir: &Path, name: &str, contents: &str) -> TestResult {
        let catalogues = dir.join("catalogues");

        fs::create_dir_all(&catalogues)?;
        fs::write(catalogues.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn loads_a_catalogue_preserving_record_order() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_catalogue(
            dir.path(),
            "terrace",
            "catalogue:\n  - element: Wall\n    units: sqm\n    quantity: 100\n    eco_rate: 12\n    non_eco_rate: 10\n    carbon_offset: 50\n  - element: Door\n    units: count\n    quantity: 5\n    non_eco_rate: 15\n",
        )?;

        let catalogue = Fixture::with_base_path(dir.path()).load_catalogue("terrace")?;

        assert_eq!(catalogue.len(), 2);

        let elements: Vec<&str> = catalogue.iter().map(|item| item.element()).collect();

        assert_eq!(elements, vec!["Wall", "Door"]);

        let wall = catalogue.get(0)?;

        assert_eq!(wall.eco_rate(), Some(12.0));

        let door = catalogue.get(1)?;

        assert!(!door.offers_eco());
        assert_eq!(door.carbon_offset(), 0.0);

        Ok(())
    }

    #[test]
    fn missing_non_eco_rate_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_catalogue(
            dir.path(),
            "broken",
            "catalogue:\n  - element: Wall\n    units: sqm\n    quantity: 100\n    eco_rate: 12\n    carbon_offset: 50\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_catalogue("broken");

        assert!(matches!(
            result,
            Err(FixtureError::Catalogue(CatalogueError::MissingNonEcoRate(element)))
                if element == "Wall"
        ));

        Ok(())
    }

    #[test]
    fn unknown_unit_fails_parsing() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_catalogue(
            dir.path(),
            "broken",
            "catalogue:\n  - element: Wall\n    units: furlong\n    quantity: 100\n    non_eco_rate: 10\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_catalogue("broken");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = Fixture::with_base_path("/nonexistent").load_catalogue("nothing");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn invalid_record_surfaces_catalogue_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_catalogue(
            dir.path(),
            "broken",
            "catalogue:\n  - element: Wall\n    units: sqm\n    quantity: -3\n    non_eco_rate: 10\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_catalogue("broken");

        assert!(matches!(
            result,
            Err(FixtureError::Catalogue(CatalogueError::NegativeQuantity { .. }))
        ));

        Ok(())
    }

    #[test]
    fn bundled_sets_load() -> TestResult {
        let four_bed = Fixture::from_set("four_bed")?;

        assert!(!four_bed.is_empty());
        assert!(four_bed.total_area() > 0.0);

        let bungalow = Fixture::from_set("bungalow")?;

        assert_eq!(bungalow.len(), 3);

        Ok(())
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
    }
}
