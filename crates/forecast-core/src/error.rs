//! Centralized error types for the Forecast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Message shown when a place name cannot be geocoded.
pub const PLACE_NOT_FOUND_MESSAGE: &str = "Không tìm thấy địa điểm.";

/// Message shown when weather data cannot be fetched for a resolved place.
pub const WEATHER_NOT_FOUND_MESSAGE: &str = "Không tìm thấy dữ liệu thời tiết.";

/// Top-level application error type.
///
/// All errors in the Forecast application should be convertible to this type.
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// Classify an error that reached the binary edge.
    ///
    /// Typed errors buried under `anyhow` context keep their own variant so
    /// their user message survives; anything else becomes `Other`.
    #[must_use]
    pub fn from_report(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return AppError::Config(e),
            Err(err) => err,
        };
        match err.downcast::<WeatherError>() {
            Ok(e) => AppError::Weather(e),
            Err(err) => AppError::Other(err),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => {
                "Weather API key is missing. Set FORECAST_API_KEY or add weather.api_key to config.toml."
            }
        }
    }
}

/// Weather lookup errors, one per user action.
///
/// Transient network failures and permanent not-found answers collapse into
/// the same variant for a given action.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("Weather lookup failed: {0}")]
    WeatherLookup(String),
}

impl WeatherError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::PlaceNotFound(_) => PLACE_NOT_FOUND_MESSAGE,
            WeatherError::WeatherLookup(_) => WEATHER_NOT_FOUND_MESSAGE,
        }
    }
}
