//! Weather lookups for Forecast
//!
//! Geocoding and current conditions via the OpenWeatherMap API, plus the
//! pure helpers the presenter needs (unit conversion, background selection).

pub mod background;
pub mod geocode;
pub mod provider;
pub mod types;

pub use background::{background_condition, theme_name, BackgroundCondition};
pub use geocode::{resolve_place, suggest};
pub use provider::WeatherProvider;
pub use types::*;
