//! Country/city reference dataset.
//!
//! The JSON layout follows the common `country-state-city` export:
//!
//! ```json
//! {
//!   "countries": [{ "name": "United Kingdom", "isoCode": "GB" }],
//!   "cities": { "GB": [{ "name": "London" }] }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

const BUNDLED: &str = include_str!("../data/cities.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(rename = "isoCode")]
    pub iso_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDataset {
    pub countries: Vec<Country>,
    /// Cities keyed by country ISO code.
    #[serde(default)]
    pub cities: HashMap<String, Vec<City>>,
}

impl ReferenceDataset {
    /// Small sample shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).context("Failed to parse bundled city dataset")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read city dataset: {}", path.display()))?;

        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse city dataset: {}", path.display()))
    }

    /// Loads `path` when given, the bundled sample otherwise.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::bundled(),
        }
    }

    pub fn cities_of(&self, iso_code: &str) -> &[City] {
        self.cities.get(iso_code).map(Vec::as_slice).unwrap_or(&[])
    }
}
