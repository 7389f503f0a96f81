//! Search/result view state and its transitions.
//!
//! All UI state lives in one [`UiState`]; it only changes through
//! [`UiState::handle`], which returns the network work (if any) the event
//! requires. Running that work is the model's job.

use forecast_weather::{is_searchable, Coordinates, PlaceCandidate, TemperatureUnit, WeatherSnapshot};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Search form, nothing loaded.
    #[default]
    Idle,
    /// A place or weather lookup is in flight.
    Loading,
    /// Weather summary for one place.
    ResultsShown(WeatherSnapshot),
    /// Search form with the message of the last failed lookup.
    Error(String),
}

/// Named inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    QueryChanged(String),
    SuggestionsLoaded { seq: u64, places: Vec<PlaceCandidate> },
    Submit,
    PickSuggestion(usize),
    FetchSucceeded(WeatherSnapshot),
    FetchFailed(String),
    NewSearch,
    ToggleUnit,
}

/// Network work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchSuggestions {
        seq: u64,
        query: String,
    },
    SearchPlace {
        query: String,
    },
    FetchWeather {
        coordinates: Coordinates,
        display_name: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    view: ViewState,
    query: String,
    suggestions: Vec<PlaceCandidate>,
    unit: TemperatureUnit,
    // Token of the latest suggestion request; older responses are dropped.
    suggestion_seq: u64,
}

impl UiState {
    #[must_use]
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn suggestions(&self) -> &[PlaceCandidate] {
        &self.suggestions
    }

    #[must_use]
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.view {
            ViewState::ResultsShown(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.view {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// True whenever the search form is on screen (everything but results).
    #[must_use]
    pub fn shows_form(&self) -> bool {
        !matches!(self.view, ViewState::ResultsShown(_))
    }

    fn accepts_lookup(&self) -> bool {
        matches!(self.view, ViewState::Idle | ViewState::Error(_))
    }

    fn next_seq(&mut self) -> u64 {
        self.suggestion_seq += 1;
        self.suggestion_seq
    }

    /// Apply one event and return the request it triggers, if any.
    pub fn handle(&mut self, event: UiEvent) -> Option<Effect> {
        match event {
            UiEvent::QueryChanged(query) => {
                if !self.shows_form() {
                    tracing::debug!("Ignoring query edit while results are shown");
                    return None;
                }
                self.query = query;
                let seq = self.next_seq();
                if is_searchable(&self.query) {
                    Some(Effect::FetchSuggestions {
                        seq,
                        query: self.query.clone(),
                    })
                } else {
                    self.suggestions.clear();
                    None
                }
            }
            UiEvent::SuggestionsLoaded { seq, places } => {
                if seq != self.suggestion_seq {
                    tracing::debug!(
                        "Discarding stale suggestions (seq {} < {})",
                        seq,
                        self.suggestion_seq
                    );
                    return None;
                }
                self.suggestions = places;
                None
            }
            UiEvent::Submit => {
                if !self.accepts_lookup() || !is_searchable(&self.query) {
                    return None;
                }
                self.view = ViewState::Loading;
                Some(Effect::SearchPlace {
                    query: self.query.clone(),
                })
            }
            UiEvent::PickSuggestion(index) => {
                if !self.accepts_lookup() {
                    return None;
                }
                let place = self.suggestions.get(index)?;
                let effect = Effect::FetchWeather {
                    coordinates: place.coordinates(),
                    display_name: place.label(),
                };
                self.view = ViewState::Loading;
                Some(effect)
            }
            UiEvent::FetchSucceeded(snapshot) => {
                if !self.is_loading() {
                    return None;
                }
                self.view = ViewState::ResultsShown(snapshot);
                self.query.clear();
                self.suggestions.clear();
                self.next_seq();
                None
            }
            UiEvent::FetchFailed(message) => {
                if !self.is_loading() {
                    return None;
                }
                self.view = ViewState::Error(message);
                None
            }
            UiEvent::NewSearch => {
                if self.is_loading() {
                    return None;
                }
                self.view = ViewState::Idle;
                self.query.clear();
                self.suggestions.clear();
                self.next_seq();
                None
            }
            UiEvent::ToggleUnit => {
                self.unit = self.unit.toggled();
                None
            }
        }
    }
}
