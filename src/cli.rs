use clap::Parser;
use forecast_ui::UiState;
use std::path::PathBuf;

/// Forecast - current weather for any place, with live suggestions
#[derive(Parser, Debug)]
#[command(name = "forecast")]
#[command(about = "Look up current weather for a place", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Place to look up once and exit (omit for the interactive prompt)
    pub query: Option<String>,

    /// Start with temperatures in Fahrenheit
    #[arg(long)]
    pub fahrenheit: bool,

    /// OpenWeatherMap API key (overrides FORECAST_API_KEY and the config file)
    #[arg(long, env = "FORECAST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Replace the query text
    Query(String),
    /// Submit the current query
    Submit,
    /// Choose a suggestion (1-based as displayed)
    Pick(usize),
    ToggleUnit,
    NewSearch,
    Help,
    Quit,
    /// A `:` command that could not be understood
    Unknown(String),
}

pub const HELP: &str = "\
Type a place name to see suggestions (3+ letters).
  <enter> or :go   get weather for the typed query
  :pick N          get weather for suggestion N
  :unit            switch between °C and °F
  :new             start a new search
  :help            show this help
  :quit            exit";

/// Shown when a query or pick is typed while a result is on screen.
pub const RESULTS_SHOWN_HINT: &str =
    "A result is on screen. Type :new to start another search.";

/// Why `input` cannot be applied to the current screen, if it can't.
pub fn rejected_input(input: &Input, state: &UiState) -> Option<&'static str> {
    match input {
        Input::Query(_) | Input::Pick(_) if !state.shows_form() => Some(RESULTS_SHOWN_HINT),
        _ => None,
    }
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Input::Submit;
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("go"), None) => Input::Submit,
        (Some("pick" | "p"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Pick(n),
            _ => Input::Unknown(trimmed.to_string()),
        },
        (Some("unit" | "u"), None) => Input::ToggleUnit,
        (Some("new" | "n"), None) => Input::NewSearch,
        (Some("help" | "h" | "?"), None) => Input::Help,
        (Some("quit" | "q" | "exit"), None) => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_ui::models::UiEvent;
    use forecast_weather::{Coordinates, TemperatureUnit, WeatherSnapshot};

    #[test]
    fn test_plain_text_is_query() {
        assert_eq!(parse_input("Lon\n"), Input::Query("Lon".into()));
        assert_eq!(parse_input("New York\r\n"), Input::Query("New York".into()));
    }

    #[test]
    fn test_blank_line_submits() {
        assert_eq!(parse_input("\n"), Input::Submit);
        assert_eq!(parse_input(":go"), Input::Submit);
    }

    #[test]
    fn test_pick() {
        assert_eq!(parse_input(":pick 3"), Input::Pick(3));
        assert_eq!(parse_input(":p 1"), Input::Pick(1));
        assert!(matches!(parse_input(":pick 0"), Input::Unknown(_)));
        assert!(matches!(parse_input(":pick x"), Input::Unknown(_)));
        assert!(matches!(parse_input(":pick"), Input::Unknown(_)));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input(":unit"), Input::ToggleUnit);
        assert_eq!(parse_input(":new"), Input::NewSearch);
        assert_eq!(parse_input(":help"), Input::Help);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert!(matches!(parse_input(":weather"), Input::Unknown(_)));
    }

    fn results_state() -> UiState {
        let snapshot = WeatherSnapshot {
            display_name: "Hanoi, VN".to_string(),
            coordinates: Coordinates {
                latitude: 21.0285,
                longitude: 105.8542,
            },
            condition_main: "Clouds".to_string(),
            condition_description: "overcast clouds".to_string(),
            temperature: 27.0,
            feels_like: 29.5,
            temp_min: 26.0,
            temp_max: 28.0,
            humidity: 78,
            pressure: 1008,
            wind_speed: 2.4,
            sunrise: 1_700_000_000,
            sunset: 1_700_042_000,
        };
        let mut state = UiState::new(TemperatureUnit::Celsius);
        state.handle(UiEvent::QueryChanged("Hanoi".into()));
        state.handle(UiEvent::Submit);
        state.handle(UiEvent::FetchSucceeded(snapshot));
        state
    }

    #[test]
    fn test_query_on_results_screen_points_to_new() {
        let state = results_state();
        assert_eq!(
            rejected_input(&Input::Query("Paris".into()), &state),
            Some(RESULTS_SHOWN_HINT)
        );
        assert_eq!(rejected_input(&Input::Pick(1), &state), Some(RESULTS_SHOWN_HINT));
        assert!(RESULTS_SHOWN_HINT.contains(":new"));
    }

    #[test]
    fn test_results_screen_still_takes_commands() {
        let state = results_state();
        assert_eq!(rejected_input(&Input::NewSearch, &state), None);
        assert_eq!(rejected_input(&Input::ToggleUnit, &state), None);
        assert_eq!(rejected_input(&Input::Submit, &state), None);
    }

    #[test]
    fn test_form_accepts_queries() {
        let state = UiState::default();
        assert_eq!(rejected_input(&Input::Query("Paris".into()), &state), None);
        assert_eq!(rejected_input(&Input::Pick(1), &state), None);
    }

    #[test]
    fn test_cli_parses_one_shot() {
        let cli = Cli::parse_from(["forecast", "--fahrenheit", "Hanoi"]);
        assert_eq!(cli.query.as_deref(), Some("Hanoi"));
        assert!(cli.fahrenheit);
    }
}
