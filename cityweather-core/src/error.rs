/// Failures at the weather-fetch boundary.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Weather API rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl WeatherError {
    /// True for the cases a user sees as "city not found": an unknown city or
    /// any transport failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::CityNotFound(_) | WeatherError::Network(_))
    }
}
