//! Cache-or-fetch resolution of the four public resources.
//!
//! Locations and forecasts are looked up in the store first and only fetched
//! from their provider on a miss. Businesses and movies always go to their
//! provider and are never stored.

use crate::clients::ProviderError;
use crate::domain::{Coordinates, LocationId};
use crate::models::{Business, ForecastDay, Location, Movie};
use thiserror::Error;

/// Failure classes surfaced by a resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing matched the query: an empty provider result, or a forecast
    /// request for a location id with no stored row.
    #[error("No {resource} found for '{query}'")]
    NotFound {
        resource: &'static str,
        query: String,
    },

    /// The provider body was missing required fields or did not decode.
    #[error("Malformed {provider} response: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Provider(ProviderError),

    #[error("Store error: {0}")]
    Store(String),
}

impl ResolveError {
    pub fn not_found(resource: &'static str, query: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            query: query.into(),
        }
    }

    pub fn malformed(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            reason: reason.into(),
        }
    }
}

impl From<ProviderError> for ResolveError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Decode { provider, source } => Self::MalformedResponse {
                provider,
                reason: source.to_string(),
            },
            other => Self::Provider(other),
        }
    }
}

impl From<anyhow::Error> for ResolveError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}

/// Resolves locations, forecasts, businesses and movies.
///
/// # Examples
///
/// ```rust,ignore
/// use cityscope::services::{ResolveError, ResolverService};
/// use std::sync::Arc;
///
/// async fn example(resolver: Arc<dyn ResolverService>) -> Result<(), ResolveError> {
///     let location = resolver.resolve_location("Seattle, WA").await?;
///     let days = resolver
///         .resolve_forecast(location.id.unwrap_or_default(), location.coordinates())
///         .await?;
///     println!("{} days for {}", days.len(), location.formatted_query);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait ResolverService: Send + Sync {
    /// Returns the stored location for `search_query`, geocoding and storing
    /// it on a miss.
    ///
    /// A failed store write is logged and does not fail the call; the
    /// returned record then carries no id.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] when the geocoder has no result
    /// - [`ResolveError::MalformedResponse`] when its body lacks required fields
    /// - [`ResolveError::Provider`] on transport or upstream failures
    /// - [`ResolveError::Store`] when the cache lookup itself fails
    async fn resolve_location(&self, search_query: &str) -> Result<Location, ResolveError>;

    /// Returns the stored forecast rows for `location_id`, fetching and
    /// appending every provider day on a miss.
    ///
    /// A miss for an id with no `locations` row is [`ResolveError::NotFound`]
    /// and never reaches the provider.
    async fn resolve_forecast(
        &self,
        location_id: LocationId,
        coordinates: Coordinates,
    ) -> Result<Vec<ForecastDay>, ResolveError>;

    /// Live business search near `coordinates`. Nothing is stored.
    async fn resolve_businesses(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<Business>, ResolveError>;

    /// Live movie search for `query`. Nothing is stored.
    async fn resolve_movies(&self, query: &str) -> Result<Vec<Movie>, ResolveError>;
}
