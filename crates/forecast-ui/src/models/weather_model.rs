use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use forecast_core::AppError;
use forecast_weather::TemperatureUnit;

use crate::app_services::AppServices;
use crate::models::view_state::{Effect, UiEvent, UiState};
use crate::presenter;
use crate::services::{self, WeatherServiceMessage};

/// Drives [`UiState`] from user actions and completed requests.
///
/// User actions become events; effects returned by the state machine are
/// handed to the weather service, and their results come back through
/// [`WeatherModel::poll_channel`] or [`WeatherModel::wait_idle`].
pub struct WeatherModel {
    state: UiState,
    services: Arc<AppServices>,
    // Requests sent whose message has not been received yet.
    pending: usize,
}

impl WeatherModel {
    #[must_use]
    pub fn new(services: Arc<AppServices>, unit: TemperatureUnit) -> Self {
        Self {
            state: UiState::new(unit),
            services,
            pending: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.dispatch(UiEvent::QueryChanged(query.into()));
    }

    pub fn submit(&mut self) {
        self.dispatch(UiEvent::Submit);
    }

    pub fn pick_suggestion(&mut self, index: usize) {
        self.dispatch(UiEvent::PickSuggestion(index));
    }

    pub fn toggle_unit(&mut self) {
        self.dispatch(UiEvent::ToggleUnit);
    }

    pub fn new_search(&mut self) {
        self.dispatch(UiEvent::NewSearch);
    }

    /// Render the current view against the wall clock.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_at(Utc::now())
    }

    #[must_use]
    pub fn render_at(&self, now: DateTime<Utc>) -> String {
        presenter::render(&self.state, now)
    }

    /// Apply every message that has already arrived (non-blocking).
    pub fn poll_channel(&mut self) {
        while let Some(msg) = self.services.try_recv_weather_message() {
            self.apply_message(msg);
        }
    }

    /// Block until all outstanding requests have reported or `timeout` passes.
    /// Returns false on timeout.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!("Timed out with {} weather requests outstanding", self.pending);
                return false;
            }
            match self.services.recv_weather_message_timeout(remaining) {
                Some(msg) => self.apply_message(msg),
                None => {
                    tracing::warn!("Timed out with {} weather requests outstanding", self.pending);
                    return false;
                }
            }
        }
        true
    }

    fn dispatch(&mut self, event: UiEvent) {
        if let Some(effect) = self.state.handle(event) {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        let tx = self.services.weather_service_tx();
        let runtime = self.services.runtime_handle();
        let provider = self.services.weather_provider();

        match effect {
            Effect::FetchSuggestions { seq, query } => {
                services::request_weather_suggestions(tx, &runtime, provider, seq, query);
            }
            Effect::SearchPlace { query } => {
                tracing::info!("Searching for '{}'", query);
                services::request_weather_search(tx, &runtime, provider, query);
            }
            Effect::FetchWeather {
                coordinates,
                display_name,
            } => {
                tracing::info!("Fetching weather for {}", display_name);
                services::request_weather_fetch(tx, &runtime, provider, coordinates, display_name);
            }
        }
        self.pending += 1;
    }

    fn apply_message(&mut self, msg: WeatherServiceMessage) {
        self.pending = self.pending.saturating_sub(1);

        let event = match msg {
            WeatherServiceMessage::SuggestionsDone { seq, places } => {
                UiEvent::SuggestionsLoaded { seq, places }
            }
            WeatherServiceMessage::FetchDone(Ok(snapshot)) => UiEvent::FetchSucceeded(snapshot),
            WeatherServiceMessage::FetchDone(Err(e)) => {
                tracing::error!("Weather lookup failed: {}", e);
                let app_err: AppError = e.into();
                UiEvent::FetchFailed(app_err.user_message().to_string())
            }
        };

        self.dispatch(event);
    }
}
