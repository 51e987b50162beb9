use std::sync::Arc;

use cityweather_core::{
    Applied, CityIndex, CityRecord, Config, SearchController, SuggestionMode, WeatherSession,
    fetch_report, provider_from_config, search::MAX_SUGGESTIONS,
};
use inquire::{
    CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};

use crate::render;

/// Live prefix suggestions while typing.
#[derive(Clone)]
struct CityCompleter {
    controller: SearchController,
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let state = self.controller.on_query_change(input);
        Ok(state.suggestions.iter().map(CityRecord::display).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run(
    config: &Config,
    index: Arc<CityIndex>,
    mode: SuggestionMode,
) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let mut controller = SearchController::new(index, mode);
    let mut session = WeatherSession::new(config.failure_policy);

    println!("Type a city or country and press Enter. Esc quits.");

    loop {
        let target = match prompt_target(&mut controller) {
            Ok(Some(city)) => city,
            Ok(None) => continue,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let token = session.begin_request();
        let result = fetch_report(provider.as_ref(), &target).await;

        match session.apply(token, result) {
            Applied::Updated => {
                controller.on_fetch_succeeded();
                if let Some(report) = session.report() {
                    println!("\n{}", render::report(report, config.icon_base_url()));
                }
            }
            Applied::Stale => {}
            Applied::Failed(err) => {
                eprintln!("{}", render::failure(&err));
                if let Some(report) = session.report() {
                    println!("Still showing {}.", report.current.location_name);
                }
            }
        }
    }

    Ok(())
}

/// Reads one search and resolves it to a city name to fetch. `None` means the
/// user backed out of a sub-prompt or submitted nothing.
fn prompt_target(controller: &mut SearchController) -> Result<Option<String>, InquireError> {
    match controller.mode() {
        SuggestionMode::Prefix => {
            let answer = Text::new("City or country:")
                .with_autocomplete(CityCompleter {
                    controller: controller.clone(),
                })
                .with_page_size(MAX_SUGGESTIONS)
                .prompt()?;

            if let Some(record) = controller.index().find_by_display(&answer).cloned() {
                return Ok(Some(controller.on_select(&record).city));
            }

            controller.on_query_change(&answer);
            Ok(controller.on_submit())
        }
        SuggestionMode::Country => {
            let answer = Text::new("City or country:").prompt()?;
            controller.on_query_change(&answer);

            // A full country name opens the city list instead of searching.
            let cities = controller.country_cities(&answer);
            if cities.is_empty() {
                return Ok(controller.on_submit());
            }

            let options: Vec<String> = cities.iter().map(CityRecord::display).collect();
            let picked = match Select::new("Select a city...", options).raw_prompt() {
                Ok(picked) => picked,
                Err(InquireError::OperationCanceled) => return Ok(None),
                Err(err) => return Err(err),
            };

            Ok(cities
                .get(picked.index)
                .map(|r| controller.on_select(r).city))
        }
    }
}
