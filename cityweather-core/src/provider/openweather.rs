use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::WeatherError,
    model::{ForecastDay, Units, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        if city.is_empty() {
            return Err(WeatherError::CityNotFound(String::new()));
        }

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!(%url, city, units = %self.units, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(endpoint, %status, bytes = body.len(), "OpenWeather responded");

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            return Err(WeatherError::Rejected {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("{endpoint}: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

fn first_condition(weather: Vec<OwWeather>, what: &str) -> Result<OwWeather, WeatherError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MalformedResponse(format!("{what}: empty weather list")))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        let condition = first_condition(parsed.weather, "weather")?;

        Ok(WeatherSnapshot {
            location_name: parsed.name,
            country_code: parsed.sys.country,
            temperature: parsed.main.temp,
            condition_description: condition.description,
            icon_id: condition.icon,
            timestamp: parsed.dt,
            timezone_offset_seconds: parsed.timezone,
            sunrise_timestamp: parsed.sys.sunrise,
            sunset_timestamp: parsed.sys.sunset,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;

        parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = first_condition(entry.weather, "forecast")?;
                Ok(ForecastDay {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    condition_description: condition.description,
                    icon_id: condition.icon,
                })
            })
            .collect()
    }

    fn units(&self) -> Units {
        self.units
    }
}

/// The API's own `message` field when present, otherwise a truncated body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
