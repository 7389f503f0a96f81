//! Interactive layer of Forecast: view state machine, request services and
//! the text presenter.

pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod presenter;
pub mod services;

pub use app_services::AppServices;
pub use models::{UiState, ViewState, WeatherModel};
