//! Weather backend: async suggestion and weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use forecast_weather::{Coordinates, PlaceCandidate, WeatherProvider, WeatherSnapshot};
use tokio::runtime::Handle;

/// Error type for weather operations, one variant per user action
#[derive(Debug, Clone)]
pub enum WeatherError {
    /// Submitted text did not geocode to any place.
    PlaceNotFound(String),
    /// Coordinates resolved but current conditions could not be fetched.
    Lookup(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::PlaceNotFound(s) => write!(f, "Place lookup error: {}", s),
            WeatherError::Lookup(s) => write!(f, "Weather error: {}", s),
        }
    }
}

impl std::error::Error for WeatherError {}

/// Messages sent from async operations back to the UI thread.
/// Every request produces exactly one message.
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Suggestions for the query issued with token `seq`
    SuggestionsDone {
        seq: u64,
        places: Vec<PlaceCandidate>,
    },
    /// Result of a search or a suggestion pick
    FetchDone(Result<WeatherSnapshot, WeatherError>),
}

/// Request suggestions for a query. Failures arrive as an empty list.
pub fn request_suggestions(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    seq: u64,
    query: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let places = forecast_weather::suggest(&provider, &query).await;
        let _ = tx.send(WeatherServiceMessage::SuggestionsDone { seq, places });
    });
}

/// Resolve free text to its first match, then fetch its weather.
/// Sends `FetchDone` on the channel when complete.
pub fn request_search(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    query: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let place = match forecast_weather::resolve_place(&provider, &query).await {
            Ok(place) => place,
            Err(e) => {
                let _ = tx.send(WeatherServiceMessage::FetchDone(Err(
                    WeatherError::PlaceNotFound(e.to_string()),
                )));
                return;
            }
        };

        let result = provider
            .fetch_current(place.coordinates(), &place.label())
            .await
            .map_err(|e| WeatherError::Lookup(e.to_string()));
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}

/// Fetch weather for already-resolved coordinates.
/// Sends `FetchDone` on the channel when complete.
pub fn request_weather(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    coordinates: Coordinates,
    display_name: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = provider
            .fetch_current(coordinates, &display_name)
            .await
            .map_err(|e| WeatherError::Lookup(e.to_string()));
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}
