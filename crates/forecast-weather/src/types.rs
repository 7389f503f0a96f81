use serde::{Deserialize, Serialize};

pub use forecast_core::TemperatureUnit;

/// Queries shorter than this (in characters) never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum number of suggestions requested per keystroke.
pub const SUGGESTION_LIMIT: u8 = 5;

/// Whether a query is long enough to geocode.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// Coarse weather classification, taken from the provider's `main` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Haze,
    Fog,
    Dust,
    Squall,
    Tornado,
    #[default]
    Unknown,
}

impl ConditionCategory {
    /// Map the provider's condition group name.
    /// See: https://openweathermap.org/weather-conditions
    #[must_use]
    pub fn from_main(main: &str) -> Self {
        match main.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "smoke" | "haze" => Self::Haze,
            "fog" => Self::Fog,
            "dust" | "sand" | "ash" => Self::Dust,
            "squall" => Self::Squall,
            "tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    /// Short identifier used to build background theme names
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Mist => "mist",
            Self::Haze => "haze",
            Self::Fog => "fog",
            Self::Dust => "dust",
            Self::Squall => "squall",
            Self::Tornado => "tornado",
            Self::Unknown => "default",
        }
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceCandidate {
    /// `"name, country"` with `", state"` appended when present.
    #[must_use]
    pub fn label(&self) -> String {
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", self.name, self.country, state),
            None => format!("{}, {}", self.name, self.country),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Current conditions for one resolved place, as fetched.
///
/// Temperatures are Celsius; conversion happens only when formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub display_name: String,
    pub coordinates: Coordinates,
    pub condition_main: String,
    pub condition_description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub sunrise: i64,
    pub sunset: i64,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn condition(&self) -> ConditionCategory {
        ConditionCategory::from_main(&self.condition_main)
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },
    #[error("No place matches '{0}'")]
    NoMatches(String),
}
