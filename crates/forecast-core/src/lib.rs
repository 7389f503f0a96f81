pub mod config;
pub mod error;

pub use config::{Config, TemperatureUnit, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ConfigError, WeatherError, PLACE_NOT_FOUND_MESSAGE, WEATHER_NOT_FOUND_MESSAGE,
};

use anyhow::Result;

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `default_filter`. Output goes to stderr so the
/// rendered view on stdout is not interleaved with log lines.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    tracing::debug!("Forecast core initialized");
    Ok(())
}
