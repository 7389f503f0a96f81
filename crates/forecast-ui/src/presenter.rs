//! Text rendering of the search form and the weather summary.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone, Utc};
use forecast_weather::{background_condition, theme_name, TemperatureUnit, WeatherSnapshot};

use crate::models::view_state::UiState;

pub const TITLE: &str = "Weather Forecast App";
pub const PLACEHOLDER: &str = "Enter City or Country (min 3 letters)";
pub const SUBMIT_LABEL: &str = "Get Weather";
pub const LOADING_LABEL: &str = "Loading...";
pub const NEW_SEARCH_LABEL: &str = "New Search";

/// Render the whole screen. `now` decides day/night for the background.
#[must_use]
pub fn render(state: &UiState, now: DateTime<Utc>) -> String {
    let background = background_condition(state.snapshot(), now);

    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", TITLE);
    let _ = writeln!(out, "[background: {}]", theme_name(background.as_ref()));
    out.push('\n');

    match state.snapshot() {
        Some(snapshot) => render_results(&mut out, snapshot, state.unit()),
        None => render_form(&mut out, state),
    }

    out
}

/// Suggestion entries as shown to the user, in provider order.
#[must_use]
pub fn suggestion_labels(state: &UiState) -> Vec<String> {
    state.suggestions().iter().map(|s| s.label()).collect()
}

fn render_form(out: &mut String, state: &UiState) {
    if state.query().is_empty() {
        let _ = writeln!(out, "> ({})", PLACEHOLDER);
    } else {
        let _ = writeln!(out, "> {}", state.query());
    }

    for (i, label) in suggestion_labels(state).iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, label);
    }

    let submit = if state.is_loading() {
        LOADING_LABEL
    } else {
        SUBMIT_LABEL
    };
    let _ = writeln!(out, "[ {} ]", submit);

    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {}", error);
    }
}

fn render_results(out: &mut String, snapshot: &WeatherSnapshot, unit: TemperatureUnit) {
    let _ = writeln!(out, "[ {} ]", NEW_SEARCH_LABEL);
    let _ = writeln!(out, "{}", snapshot.display_name);
    let _ = writeln!(
        out,
        "Lat: {}, Lon: {}    [ °{} ]",
        snapshot.coordinates.latitude,
        snapshot.coordinates.longitude,
        unit.symbol()
    );
    out.push('\n');
    let _ = writeln!(out, "{}", unit.format(snapshot.temperature));
    let _ = writeln!(out, "Feels like: {}", unit.format(snapshot.feels_like));
    let _ = writeln!(
        out,
        "{} - {}",
        snapshot.condition_main, snapshot.condition_description
    );
    out.push('\n');
    let _ = writeln!(out, "High: {}", unit.format(snapshot.temp_max));
    let _ = writeln!(out, "Low: {}", unit.format(snapshot.temp_min));
    let _ = writeln!(out, "Humidity: {}%", snapshot.humidity);
    let _ = writeln!(out, "Pressure: {} hPa", snapshot.pressure);
    let _ = writeln!(out, "Wind: {} m/s", snapshot.wind_speed);
    let _ = writeln!(out, "Sunrise: {}", local_clock(snapshot.sunrise));
    let _ = writeln!(out, "Sunset: {}", local_clock(snapshot.sunset));
}

/// Viewer-local wall clock time for an epoch second.
fn local_clock(epoch_secs: i64) -> String {
    clock_in(&Local, epoch_secs)
}

fn clock_in<Tz: TimeZone>(tz: &Tz, epoch_secs: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(epoch_secs, 0)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view_state::{Effect, UiEvent};
    use forecast_weather::{Coordinates, PlaceCandidate};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            display_name: "London, GB, England".to_string(),
            coordinates: Coordinates {
                latitude: 51.5073,
                longitude: -0.1276,
            },
            condition_main: "Rain".to_string(),
            condition_description: "light rain".to_string(),
            temperature: 12.3,
            feels_like: 11.1,
            temp_min: 10.0,
            temp_max: 14.2,
            humidity: 81,
            pressure: 1009,
            wind_speed: 4.6,
            sunrise: 1_700_000_000,
            sunset: 1_700_030_000,
        }
    }

    fn shown(unit: TemperatureUnit) -> UiState {
        let mut state = UiState::new(unit);
        state.handle(UiEvent::QueryChanged("London".into()));
        state.handle(UiEvent::Submit);
        state.handle(UiEvent::FetchSucceeded(snapshot()));
        state
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_empty_form() {
        let text = render(&UiState::default(), Utc::now());
        assert!(text.contains(TITLE));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("[ Get Weather ]"));
        assert!(text.contains("[background: default]"));
    }

    #[test]
    fn test_loading_label() {
        let mut state = UiState::default();
        state.handle(UiEvent::QueryChanged("London".into()));
        state.handle(UiEvent::Submit);
        let text = render(&state, Utc::now());
        assert!(text.contains("[ Loading... ]"));
        assert!(!text.contains(SUBMIT_LABEL));
    }

    #[test]
    fn test_five_suggestions_rendered() {
        let mut state = UiState::default();
        let Some(Effect::FetchSuggestions { seq, .. }) =
            state.handle(UiEvent::QueryChanged("Lon".into()))
        else {
            panic!("expected suggestion request");
        };
        let places = (0..5)
            .map(|i| PlaceCandidate {
                name: format!("London{}", i),
                country: "GB".into(),
                state: (i % 2 == 0).then(|| "England".to_string()),
                latitude: 51.0 + f64::from(i),
                longitude: 0.0,
            })
            .collect();
        state.handle(UiEvent::SuggestionsLoaded { seq, places });

        let text = render(&state, Utc::now());
        let entries: Vec<&str> = text.lines().filter(|l| l.starts_with("  [")).collect();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0], "  [1] London0, GB, England");
        assert_eq!(entries[1], "  [2] London1, GB");
    }

    #[test]
    fn test_results_in_celsius() {
        let text = render(&shown(TemperatureUnit::Celsius), at(1_700_010_000));
        assert!(text.contains("[ New Search ]"));
        assert!(text.contains("London, GB, England"));
        assert!(text.contains("Lat: 51.5073, Lon: -0.1276"));
        assert!(text.contains("[ °C ]"));
        assert!(text.contains("\n12.3°C\n"));
        assert!(text.contains("Feels like: 11.1°C"));
        assert!(text.contains("Rain - light rain"));
        assert!(text.contains("High: 14.2°C"));
        assert!(text.contains("Low: 10.0°C"));
        assert!(text.contains("Humidity: 81%"));
        assert!(text.contains("Pressure: 1009 hPa"));
        assert!(text.contains("Wind: 4.6 m/s"));
        assert!(text.contains("Sunrise: "));
        assert!(text.contains("Sunset: "));
        assert!(text.contains("[background: rain-day]"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_results_in_fahrenheit() {
        let text = render(&shown(TemperatureUnit::Fahrenheit), at(1_700_010_000));
        // 12.3 * 9/5 + 32 = 54.14
        assert!(text.contains("\n54.1°F\n"));
        // 11.1 -> 51.98
        assert!(text.contains("Feels like: 52.0°F"));
        // 14.2 -> 57.56
        assert!(text.contains("High: 57.6°F"));
        // 10.0 -> 50.0
        assert!(text.contains("Low: 50.0°F"));
        assert!(text.contains("[ °F ]"));
    }

    #[test]
    fn test_toggle_twice_restores_text() {
        let mut state = shown(TemperatureUnit::Celsius);
        let now = at(1_700_010_000);
        let original = render(&state, now);

        state.handle(UiEvent::ToggleUnit);
        assert_ne!(render(&state, now), original);

        state.handle(UiEvent::ToggleUnit);
        assert_eq!(render(&state, now), original);
    }

    #[test]
    fn test_background_follows_clock() {
        let state = shown(TemperatureUnit::Celsius);
        assert!(render(&state, at(1_700_030_001)).contains("[background: rain-night]"));
    }

    #[test]
    fn test_error_line() {
        let mut state = UiState::default();
        state.handle(UiEvent::QueryChanged("Atlantis".into()));
        state.handle(UiEvent::Submit);
        state.handle(UiEvent::FetchFailed("Không tìm thấy địa điểm.".into()));
        let text = render(&state, Utc::now());
        assert!(text.contains("! Không tìm thấy địa điểm."));
        assert!(text.contains("> Atlantis"));
    }

    #[test]
    fn test_clock_in_utc() {
        assert_eq!(clock_in(&Utc, 1_700_000_000), "22:13:20");
    }
}
