//! Condition-driven background selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConditionCategory, WeatherSnapshot};

/// Theme name used when no weather is loaded.
pub const DEFAULT_BACKGROUND: &str = "default";

/// What the background should depict for the loaded weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundCondition {
    pub category: ConditionCategory,
    pub is_daytime: bool,
}

impl BackgroundCondition {
    /// Theme identifier such as `"rain-night"` or `"clear-day"`.
    #[must_use]
    pub fn theme(&self) -> String {
        let phase = if self.is_daytime { "day" } else { "night" };
        format!("{}-{}", self.category.slug(), phase)
    }
}

/// Derive the background for `snapshot` at `now`.
///
/// Daytime is strictly between sunrise and sunset. Callers pass the wall
/// clock on every render; the result must not be cached across renders.
#[must_use]
pub fn background_condition(
    snapshot: Option<&WeatherSnapshot>,
    now: DateTime<Utc>,
) -> Option<BackgroundCondition> {
    let snapshot = snapshot?;
    let now = now.timestamp();

    Some(BackgroundCondition {
        category: snapshot.condition(),
        is_daytime: snapshot.sunrise < now && now < snapshot.sunset,
    })
}

/// Theme name for an optional background, falling back to the neutral one.
#[must_use]
pub fn theme_name(condition: Option<&BackgroundCondition>) -> String {
    condition
        .map(BackgroundCondition::theme)
        .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;
    use chrono::TimeZone;

    const SUNRISE: i64 = 1_700_000_000;
    const SUNSET: i64 = 1_700_040_000;

    fn snapshot(main: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            display_name: "Hanoi, VN".to_string(),
            coordinates: Coordinates {
                latitude: 21.03,
                longitude: 105.85,
            },
            condition_main: main.to_string(),
            condition_description: String::new(),
            temperature: 30.0,
            feels_like: 34.0,
            temp_min: 28.0,
            temp_max: 31.0,
            humidity: 70,
            pressure: 1008,
            wind_speed: 2.0,
            sunrise: SUNRISE,
            sunset: SUNSET,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_no_snapshot_no_background() {
        assert_eq!(background_condition(None, at(SUNRISE + 10)), None);
        assert_eq!(theme_name(None), "default");
    }

    #[test]
    fn test_daytime_between_sunrise_and_sunset() {
        let snap = snapshot("Clear");
        let bg = background_condition(Some(&snap), at(SUNRISE + 3600)).unwrap();
        assert!(bg.is_daytime);
        assert_eq!(bg.category, ConditionCategory::Clear);
        assert_eq!(bg.theme(), "clear-day");
    }

    #[test]
    fn test_after_sunset_is_night() {
        let snap = snapshot("Rain");
        let bg = background_condition(Some(&snap), at(SUNSET + 1)).unwrap();
        assert!(!bg.is_daytime);
        assert_eq!(theme_name(Some(&bg)), "rain-night");
    }

    #[test]
    fn test_before_sunrise_is_night() {
        let snap = snapshot("Clouds");
        let bg = background_condition(Some(&snap), at(SUNRISE - 1)).unwrap();
        assert!(!bg.is_daytime);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let snap = snapshot("Clear");
        assert!(!background_condition(Some(&snap), at(SUNRISE)).unwrap().is_daytime);
        assert!(!background_condition(Some(&snap), at(SUNSET)).unwrap().is_daytime);
    }

    #[test]
    fn test_same_snapshot_changes_with_clock() {
        let snap = snapshot("Snow");
        let day = background_condition(Some(&snap), at(SUNSET - 1)).unwrap();
        let night = background_condition(Some(&snap), at(SUNSET + 1)).unwrap();
        assert_ne!(day, night);
    }
}
