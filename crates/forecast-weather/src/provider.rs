//! OpenWeatherMap client: direct geocoding and current conditions.

use crate::types::{Coordinates, PlaceCandidate, WeatherError, WeatherSnapshot};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = concat!("forecast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl From<GeocodeEntry> for PlaceCandidate {
    fn from(entry: GeocodeEntry) -> Self {
        Self {
            name: entry.name,
            country: entry.country,
            state: entry.state,
            latitude: entry.lat,
            longitude: entry.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    coord: CoordBlock,
    weather: Vec<ConditionBlock>,
    main: MainBlock,
    wind: WindBlock,
    sys: SysBlock,
}

#[derive(Debug, Deserialize)]
struct CoordBlock {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    sunrise: i64,
    sunset: i64,
}

impl CurrentResponse {
    fn into_snapshot(self, display_name: &str) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        Ok(WeatherSnapshot {
            display_name: display_name.to_string(),
            coordinates: Coordinates {
                latitude: self.coord.lat,
                longitude: self.coord.lon,
            },
            condition_main: condition.main,
            condition_description: condition.description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
        })
    }
}

/// The provider reports failures in a `cod` field that is a number on success
/// and usually a string otherwise.
fn status_code(body: &serde_json::Value) -> Option<String> {
    match body.get("cod")? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    /// Create a provider against `base_url`, normally `weather.api_base_url`
    /// from the config file.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up places matching a free-text query, in provider order.
    ///
    /// # Errors
    /// Network failures, non-success HTTP status, or a body that is not a list of places.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<PlaceCandidate>, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(WeatherError::Provider {
                code: status.as_u16().to_string(),
                message: body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        let entries: Vec<GeocodeEntry> = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("geocoding response: {}", e)))?;

        tracing::debug!("Geocoding '{}' returned {} matches", query, entries.len());
        Ok(entries.into_iter().map(PlaceCandidate::from).collect())
    }

    /// Fetch current conditions in metric units for a coordinate.
    ///
    /// # Errors
    /// `Provider` when the body's `cod` is not 200, `Parse` for an unexpected body,
    /// `Network` for transport failures.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current(
        &self,
        coordinates: Coordinates,
        display_name: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        // Failures are signalled in the body, whatever the HTTP status.
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("weather response: {}", e)))?;

        match status_code(&body) {
            Some(code) if code == "200" => {}
            code => {
                let message = body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown provider error")
                    .to_string();
                return Err(WeatherError::Provider {
                    code: code.unwrap_or_else(|| "missing".to_string()),
                    message,
                });
            }
        }

        let parsed: CurrentResponse = serde_json::from_value(body)
            .map_err(|e| WeatherError::Parse(format!("weather response: {}", e)))?;
        let snapshot = parsed.into_snapshot(display_name)?;

        tracing::info!(
            "Fetched weather for {}: {} {:.1}°C",
            snapshot.display_name,
            snapshot.condition_main,
            snapshot.temperature
        );
        Ok(snapshot)
    }
}
