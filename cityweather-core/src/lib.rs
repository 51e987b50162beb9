//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - The city reference dataset and its prefix-searchable index
//! - The search controller that turns input into fetch targets
//! - The OpenWeather provider, daily forecast sampling and typed fetch errors
//! - The displayed-weather session with stale-result protection
//! - Local clock formatting and configuration handling
//!
//! It is used by `cityweather-cli`, but the controller and session carry no
//! terminal assumptions and can sit behind any front end.

pub mod city_index;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;
pub mod search;
pub mod session;
pub mod time;

pub use city_index::CityIndex;
pub use config::Config;
pub use dataset::ReferenceDataset;
pub use error::WeatherError;
pub use fetch::{fetch_report, sample_daily};
pub use model::{CityRecord, ForecastDay, Units, WeatherReport, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use search::{SearchController, SearchState, Selection, SuggestionMode};
pub use session::{Applied, FailurePolicy, RequestToken, WeatherSession};
pub use time::{format_day_label, format_local_time};
