use crate::{
    error::WeatherError,
    model::{ForecastDay, WeatherReport},
    provider::WeatherProvider,
};

/// Forecast entries per day at the API's 3-hour granularity.
pub const SAMPLES_PER_DAY: usize = 8;

/// Keeps entries at positions 0, 8, 16, ... so each kept entry is one day after
/// the previous one, anchored at the first entry's hour of day.
pub fn sample_daily<T>(entries: Vec<T>) -> Vec<T> {
    entries.into_iter().step_by(SAMPLES_PER_DAY).collect()
}

/// Fetches current conditions and the forecast for `city`. The two requests
/// run independently; either failing fails the whole report.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherReport, WeatherError> {
    let (current, raw): (_, Vec<ForecastDay>) =
        tokio::try_join!(provider.current(city), provider.forecast(city))?;

    let raw_len = raw.len();
    let forecast = sample_daily(raw);
    tracing::info!(
        city,
        location = %current.location_name,
        raw = raw_len,
        days = forecast.len(),
        "weather fetched"
    );

    Ok(WeatherReport {
        current,
        forecast,
        units: provider.units(),
    })
}
