use crate::{
    Config, ForecastDay, WeatherError, WeatherSnapshot, model::Units,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Source of current conditions and raw 3-hour forecast entries for a city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// Forecast entries in API order, one per 3-hour interval.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError>;

    fn units(&self) -> Units;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `cityweather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs() {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build()?;

    let provider = OpenWeatherProvider::new(api_key, config.units)
        .with_base_url(config.api_base_url())
        .with_http_client(http);

    Ok(Box::new(provider))
}
