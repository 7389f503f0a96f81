use crate::services::weather_service::WeatherError as UiWeatherError;
use forecast_core::{AppError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::PlaceNotFound(s) => AppError::Weather(WeatherError::PlaceNotFound(s)),
            UiWeatherError::Lookup(s) => AppError::Weather(WeatherError::WeatherLookup(s)),
        }
    }
}
