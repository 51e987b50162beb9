use std::collections::HashMap;

use crate::{
    dataset::{City, Country, ReferenceDataset},
    model::CityRecord,
};

#[derive(Debug, Clone)]
struct IndexEntry {
    record: CityRecord,
    name_key: String,
    country_key: String,
}

/// In-memory list of every searchable city, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    entries: Vec<IndexEntry>,
}

impl CityIndex {
    /// Flattens countries and their city lists into records. Countries with a
    /// blank name or ISO code, or without a city list, contribute nothing.
    pub fn build(countries: &[Country], cities_by_country: &HashMap<String, Vec<City>>) -> Self {
        let mut entries = Vec::new();

        for country in countries {
            if country.name.trim().is_empty() || country.iso_code.trim().is_empty() {
                tracing::debug!(?country, "skipping incomplete country");
                continue;
            }

            let Some(cities) = cities_by_country.get(&country.iso_code) else {
                continue;
            };

            let country_key = country.name.to_lowercase();
            for city in cities.iter().filter(|c| !c.name.is_empty()) {
                entries.push(IndexEntry {
                    record: CityRecord::new(&city.name, &country.name, &country.iso_code),
                    name_key: city.name.to_lowercase(),
                    country_key: country_key.clone(),
                });
            }
        }

        tracing::debug!(records = entries.len(), "city index built");
        Self { entries }
    }

    pub fn from_dataset(dataset: &ReferenceDataset) -> Self {
        Self::build(&dataset.countries, &dataset.cities)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Records whose city or country name starts with `query`, ignoring case,
    /// capped at `limit`. An empty query matches nothing.
    pub fn prefix_matches(&self, query: &str, limit: usize) -> Vec<&CityRecord> {
        if query.is_empty() {
            return Vec::new();
        }

        let q = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name_key.starts_with(&q) || e.country_key.starts_with(&q))
            .map(|e| &e.record)
            .take(limit)
            .collect()
    }

    /// Every city of the country named exactly `country` (case-insensitive).
    pub fn cities_of_country(&self, country: &str) -> Vec<&CityRecord> {
        if country.is_empty() {
            return Vec::new();
        }

        let key = country.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.country_key == key)
            .map(|e| &e.record)
            .collect()
    }

    /// Resolves a `"{name}, {code}"` label back to its record.
    pub fn find_by_display(&self, label: &str) -> Option<&CityRecord> {
        self.iter()
            .find(|r| r.display().eq_ignore_ascii_case(label.trim()))
    }
}
