use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{city_index::CityIndex, model::CityRecord};

/// Maximum number of prefix suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 15;

/// How suggestions are presented. Matching is the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionMode {
    /// Live list of prefix matches while typing.
    #[default]
    Prefix,
    /// Free-text entry; a full country name opens a pick list of its cities.
    Country,
}

impl SuggestionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionMode::Prefix => "prefix",
            SuggestionMode::Country => "country",
        }
    }
}

impl std::fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<CityRecord>,
}

/// Outcome of picking a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// What the search box now shows, e.g. `London, GB`.
    pub display: String,
    /// City name to fetch weather for.
    pub city: String,
}

/// Turns keystrokes, selections and submissions into fetch targets.
#[derive(Debug, Clone)]
pub struct SearchController {
    index: Arc<CityIndex>,
    mode: SuggestionMode,
    state: SearchState,
}

impl SearchController {
    pub fn new(index: Arc<CityIndex>, mode: SuggestionMode) -> Self {
        Self {
            index,
            mode,
            state: SearchState::default(),
        }
    }

    pub fn mode(&self) -> SuggestionMode {
        self.mode
    }

    pub fn index(&self) -> &CityIndex {
        &self.index
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Records the raw input (untrimmed) and recomputes suggestions: records
    /// whose city or country name starts with it, at most [`MAX_SUGGESTIONS`].
    pub fn on_query_change(&mut self, raw_input: &str) -> &SearchState {
        let matches = self.index.prefix_matches(raw_input, MAX_SUGGESTIONS);

        self.state.query = raw_input.to_string();
        self.state.suggestions = matches.into_iter().cloned().collect();
        &self.state
    }

    /// All cities of the country named exactly `country` (case-insensitive),
    /// for a pick list. Leaves the search state untouched.
    pub fn country_cities(&self, country: &str) -> Vec<CityRecord> {
        self.index
            .cities_of_country(country)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn on_select(&mut self, record: &CityRecord) -> Selection {
        let display = record.display();
        self.state.query = display.clone();
        self.state.suggestions.clear();

        Selection {
            display,
            city: record.name.clone(),
        }
    }

    /// Fetch target for Enter or the search button; `None` when the query is empty.
    /// Open suggestions do not block submission.
    pub fn on_submit(&self) -> Option<String> {
        if self.state.query.is_empty() {
            None
        } else {
            Some(self.state.query.clone())
        }
    }

    pub fn on_fetch_succeeded(&mut self) {
        self.state.suggestions.clear();
    }
}
