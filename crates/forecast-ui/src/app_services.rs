//! Shared application services.
//!
//! A single `AppServices` owns the tokio runtime, the weather provider and the
//! weather service channel. Models hold it behind an `Arc` and never touch the
//! runtime directly; they submit work through `services::weather_service`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use forecast_weather::WeatherProvider;

/// Message types for the weather service channel
pub use crate::services::WeatherServiceMessage;

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    /// Weather provider
    weather_provider: Arc<WeatherProvider>,

    /// Weather service channel sender
    weather_service_tx: Sender<WeatherServiceMessage>,

    /// Weather service channel receiver
    weather_service_rx: Mutex<Receiver<WeatherServiceMessage>>,
}

impl AppServices {
    /// Build the runtime and channel around a configured provider.
    ///
    /// # Errors
    /// Fails if the tokio runtime cannot be created.
    pub fn new(weather_provider: WeatherProvider) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("forecast-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let (tx, rx) = std::sync::mpsc::channel();
        tracing::debug!("Weather service channel initialized");

        Ok(Self {
            runtime,
            weather_provider: Arc::new(weather_provider),
            weather_service_tx: tx,
            weather_service_rx: Mutex::new(rx),
        })
    }

    /// Handle for spawning work onto the runtime.
    #[must_use]
    pub fn runtime_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    #[must_use]
    pub fn weather_provider(&self) -> Arc<WeatherProvider> {
        self.weather_provider.clone()
    }

    // =========== Weather Service Channel ===========

    /// Get weather service sender.
    #[must_use]
    pub fn weather_service_tx(&self) -> &Sender<WeatherServiceMessage> {
        &self.weather_service_tx
    }

    /// Try to receive a message from the weather service channel (non-blocking).
    #[must_use]
    pub fn try_recv_weather_message(&self) -> Option<WeatherServiceMessage> {
        self.weather_service_rx.lock().try_recv().ok()
    }

    /// Wait up to `timeout` for the next weather service message.
    #[must_use]
    pub fn recv_weather_message_timeout(&self, timeout: Duration) -> Option<WeatherServiceMessage> {
        self.weather_service_rx.lock().recv_timeout(timeout).ok()
    }
}
