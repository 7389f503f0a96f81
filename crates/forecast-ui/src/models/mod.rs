pub mod view_state;
pub mod weather_model;

pub use view_state::{Effect, UiEvent, UiState, ViewState};
pub use weather_model::WeatherModel;
