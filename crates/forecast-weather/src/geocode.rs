//! Place lookups built on the provider's direct geocoding endpoint.

use crate::provider::WeatherProvider;
use crate::types::{is_searchable, PlaceCandidate, WeatherError, SUGGESTION_LIMIT};

/// Suggestions for a partially typed query.
///
/// Short queries return an empty list without touching the network. Any
/// failure also degrades to an empty list; suggestions are best-effort.
pub async fn suggest(provider: &WeatherProvider, query: &str) -> Vec<PlaceCandidate> {
    if !is_searchable(query) {
        return Vec::new();
    }

    match provider.geocode(query, SUGGESTION_LIMIT).await {
        Ok(places) => places,
        Err(e) => {
            tracing::debug!("Suggestion lookup for '{}' failed: {}", query, e);
            Vec::new()
        }
    }
}

/// Resolve a submitted query to its first geocoding match.
///
/// # Errors
/// `NoMatches` when the provider returns an empty list; lookup failures are
/// passed through for the caller to collapse.
pub async fn resolve_place(
    provider: &WeatherProvider,
    query: &str,
) -> Result<PlaceCandidate, WeatherError> {
    let place = provider
        .geocode(query, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::NoMatches(query.to_string()))?;

    tracing::info!("Resolved '{}' to {}", query, place.label());
    Ok(place)
}
