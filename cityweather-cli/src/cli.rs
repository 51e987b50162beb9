use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand, ValueEnum};
use cityweather_core::{
    CityIndex, Config, FailurePolicy, ReferenceDataset, SearchController, SuggestionMode, Units,
    fetch_report, provider_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Search cities and show their weather")]
pub struct Cli {
    /// City dataset JSON file; defaults to the bundled sample.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Unit system for temperatures.
    #[arg(long, global = true, value_enum)]
    pub units: Option<UnitsArg>,

    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and display preferences.
    Configure,

    /// List city suggestions for a query.
    Search {
        /// Start of a city or country name (case-insensitive).
        query: String,

        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name as understood by the weather API.
        city: String,
    },

    /// Search with live suggestions and show weather for the chosen city.
    Interactive {
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
    Standard,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
            UnitsArg::Standard => Units::Standard,
        }
    }
}

/// Suggestion strategy: `prefix` matches city/country starts, `country`
/// lists every city once a full country name is typed.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Prefix,
    Country,
}

impl From<ModeArg> for SuggestionMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Prefix => SuggestionMode::Prefix,
            ModeArg::Country => SuggestionMode::Country,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli {
            dataset,
            units,
            command,
        } = self;

        match command.unwrap_or(Command::Interactive { mode: None }) {
            Command::Configure => configure(Config::load()?),
            Command::Search { query, mode } => {
                let config = with_overrides(Config::load_or_default()?, dataset, units);
                let mode = mode.map(Into::into).unwrap_or(config.suggestion_mode);
                let mut controller = SearchController::new(load_index(&config)?, mode);

                let lines = search_lines(&mut controller, &query);
                if lines.is_empty() {
                    println!("No cities found matching: {query}");
                }
                for line in lines {
                    println!("{line}");
                }
                Ok(())
            }
            Command::Show { city } => {
                let config = with_overrides(Config::load_or_default()?, dataset, units);
                let provider = provider_from_config(&config)?;
                match fetch_report(provider.as_ref(), &city).await {
                    Ok(report) => {
                        print!("{}", render::report(&report, config.icon_base_url()));
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, %city, "weather fetch failed");
                        anyhow::bail!(render::failure(&err));
                    }
                }
            }
            Command::Interactive { mode } => {
                let config = with_overrides(Config::load_or_default()?, dataset, units);
                let mode = mode.map(Into::into).unwrap_or(config.suggestion_mode);
                interactive::run(&config, load_index(&config)?, mode).await
            }
        }
    }
}

/// Flags override the stored config for this run only.
fn with_overrides(
    mut config: Config,
    dataset: Option<PathBuf>,
    units: Option<UnitsArg>,
) -> Config {
    if let Some(path) = dataset {
        config.dataset_path = Some(path);
    }
    if let Some(units) = units {
        config.units = units.into();
    }
    config
}

/// One line per suggestion. In country mode a full country name lists all of
/// its cities instead.
fn search_lines(controller: &mut SearchController, query: &str) -> Vec<String> {
    let suggestions = controller.on_query_change(query).suggestions.clone();
    let records = match controller.mode() {
        SuggestionMode::Country => {
            let cities = controller.country_cities(query);
            if cities.is_empty() {
                suggestions
            } else {
                cities
            }
        }
        SuggestionMode::Prefix => suggestions,
    };

    records
        .iter()
        .map(|rec| format!("{} ({})", rec.display(), rec.country))
        .collect()
}

/// Builds the city index from the configured dataset, or the bundled sample.
pub fn load_index(config: &Config) -> anyhow::Result<Arc<CityIndex>> {
    let dataset = ReferenceDataset::load_or_bundled(config.dataset_path.as_deref())?;
    let index = CityIndex::from_dataset(&dataset);
    tracing::info!(
        cities = index.len(),
        source = ?config.dataset_path,
        "city index ready"
    );
    Ok(Arc::new(index))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key_prompt = if config.api_key.is_some() {
        "OpenWeather API key (empty keeps the current one):"
    } else {
        "OpenWeather API key:"
    };
    let api_key = Password::new(key_prompt)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let units = Units::all().to_vec();
    let start = units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", units).with_starting_cursor(start).prompt()?;

    let modes = vec![SuggestionMode::Prefix, SuggestionMode::Country];
    let start = modes.iter().position(|m| *m == config.suggestion_mode).unwrap_or(0);
    config.suggestion_mode = Select::new("Suggestions:", modes)
        .with_starting_cursor(start)
        .prompt()?;

    let policies = vec![FailurePolicy::Clear, FailurePolicy::KeepLastGood];
    let start = policies.iter().position(|p| *p == config.failure_policy).unwrap_or(0);
    config.failure_policy = Select::new("When a search fails:", policies)
        .with_starting_cursor(start)
        .prompt()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
