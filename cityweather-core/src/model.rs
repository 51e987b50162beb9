use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// One searchable city, built once from the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub country: String,
    pub country_code: String,
}

impl CityRecord {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            country_code: country_code.into(),
        }
    }

    /// Label shown once the record is selected, e.g. `London, GB`.
    pub fn display(&self) -> String {
        format!("{}, {}", self.name, self.country_code)
    }
}

/// Unit system passed to the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_code: String,
    pub temperature: f64,
    pub condition_description: String,
    pub icon_id: String,
    pub timestamp: i64,
    pub timezone_offset_seconds: i32,
    pub sunrise_timestamp: i64,
    pub sunset_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: i64,
    pub temperature: f64,
    pub condition_description: String,
    pub icon_id: String,
}

/// Snapshot and daily forecast from the same fetch. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub units: Units,
}

/// Icon asset URL for an API icon code, e.g. `10d`.
pub fn icon_url(base_url: &str, icon_id: &str) -> String {
    format!("{}/{}@2x.png", base_url.trim_end_matches('/'), icon_id)
}

/// Rounds half-up, so `-2.5` displays as `-2` and `2.5` as `3`.
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_country_code() {
        let rec = CityRecord::new("London", "United Kingdom", "GB");
        assert_eq!(rec.display(), "London, GB");
    }

    #[test]
    fn icon_url_appends_size_suffix() {
        assert_eq!(
            icon_url(DEFAULT_ICON_BASE_URL, "10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
        assert_eq!(icon_url("http://icons/", "01n"), "http://icons/01n@2x.png");
    }

    #[test]
    fn units_parse_case_insensitively() {
        for u in Units::all() {
            let parsed = Units::try_from(u.as_str().to_uppercase().as_str()).unwrap();
            assert_eq!(*u, parsed);
        }
        assert!(Units::try_from("kelvin").is_err());
    }

    #[test]
    fn temperatures_round_half_up() {
        assert_eq!(round_temperature(17.49), 17);
        assert_eq!(round_temperature(17.5), 18);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.51), -3);
    }
}
