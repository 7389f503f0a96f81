pub mod weather_service;

pub use weather_service::{
    request_search as request_weather_search, request_suggestions as request_weather_suggestions,
    request_weather as request_weather_fetch, WeatherError, WeatherServiceMessage,
};
