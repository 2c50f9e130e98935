//! Store-backed implementation of [`ResolverService`].

use crate::clients::Providers;
use crate::constants::resources;
use crate::db::{Lookup, StoreGateway};
use crate::domain::{Coordinates, LocationId};
use crate::models::{Business, ForecastDay, Location, Movie};
use crate::services::normalize;
use crate::services::resolver_service::{ResolveError, ResolverService};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Resolver that consults a [`StoreGateway`] before calling providers.
///
/// Holds no per-request state, so one instance serves all requests.
pub struct CachingResolverService {
    store: Arc<dyn StoreGateway>,
    providers: Providers,
    movie_image_base_url: String,
}

impl CachingResolverService {
    #[must_use]
    pub fn new(
        store: Arc<dyn StoreGateway>,
        providers: Providers,
        movie_image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            providers,
            movie_image_base_url: movie_image_base_url.into(),
        }
    }

    /// Writes a freshly geocoded location and attaches the id it ended up with.
    ///
    /// Losing an insert race to a concurrent request adopts the winner's id.
    async fn persist_location(&self, location: Location) -> Location {
        match self.store.insert_location(&location).await {
            Ok(Some(id)) => location.with_id(id),
            Ok(None) => match self.store.find_location(&location.search_query).await {
                Ok(Lookup::Found(existing)) => match existing.id {
                    Some(id) => location.with_id(id),
                    None => location,
                },
                Ok(Lookup::Missing) => location,
                Err(e) => {
                    warn!(
                        search_query = %location.search_query,
                        "Failed to re-read location after insert conflict: {e:#}"
                    );
                    location
                }
            },
            Err(e) => {
                record_store_write_failure("locations");
                error!(
                    search_query = %location.search_query,
                    "Failed to store location: {e:#}"
                );
                location
            }
        }
    }

    /// Appends each day in order. Failures are logged per day and skipped.
    async fn persist_forecast(&self, days: &[ForecastDay], location_id: LocationId) {
        let mut failed = 0usize;

        for day in days {
            if let Err(e) = self.store.insert_forecast_day(day, location_id).await {
                failed += 1;
                record_store_write_failure("weathers");
                warn!(
                    location_id = %location_id,
                    time = %day.time,
                    "Failed to store forecast day: {e:#}"
                );
            }
        }

        if failed > 0 {
            error!(
                location_id = %location_id,
                "{} of {} forecast days were not stored",
                failed,
                days.len()
            );
        }
    }
}

#[async_trait::async_trait]
impl ResolverService for CachingResolverService {
    async fn resolve_location(&self, search_query: &str) -> Result<Location, ResolveError> {
        if let Lookup::Found(location) = self.store.find_location(search_query).await? {
            record_cache_lookup(resources::LOCATION, "hit");
            debug!(search_query, "Location served from store");
            return Ok(location);
        }
        record_cache_lookup(resources::LOCATION, "miss");

        let response = self.providers.geocode.geocode(search_query).await?;
        let location = normalize::location_from_geocode(search_query, response)?;
        let location = self.persist_location(location).await;

        info!(
            search_query,
            formatted_query = %location.formatted_query,
            "Geocoded new location"
        );

        Ok(location)
    }

    async fn resolve_forecast(
        &self,
        location_id: LocationId,
        coordinates: Coordinates,
    ) -> Result<Vec<ForecastDay>, ResolveError> {
        if let Lookup::Found(days) = self.store.find_forecast(location_id).await? {
            record_cache_lookup(resources::FORECAST, "hit");
            debug!(location_id = %location_id, days = days.len(), "Forecast served from store");
            return Ok(days);
        }
        record_cache_lookup(resources::FORECAST, "miss");

        if !self.store.location_exists(location_id).await? {
            return Err(ResolveError::not_found(
                resources::LOCATION,
                location_id.to_string(),
            ));
        }

        let response = self
            .providers
            .forecast
            .forecast(coordinates.latitude, coordinates.longitude)
            .await?;
        let days = normalize::forecast_from_darksky(response, location_id)?;

        self.persist_forecast(&days, location_id).await;

        info!(
            location_id = %location_id,
            days = days.len(),
            "Fetched forecast"
        );

        Ok(days)
    }

    async fn resolve_businesses(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<Business>, ResolveError> {
        let response = self
            .providers
            .businesses
            .search_businesses(coordinates.latitude, coordinates.longitude)
            .await?;
        let businesses = normalize::businesses_from_yelp(response)?;

        debug!(
            resource = resources::BUSINESSES,
            %coordinates,
            count = businesses.len(),
            "Business search finished"
        );
        Ok(businesses)
    }

    async fn resolve_movies(&self, query: &str) -> Result<Vec<Movie>, ResolveError> {
        let response = self.providers.movies.search_movies(query).await?;
        let movies = normalize::movies_from_tmdb(response, &self.movie_image_base_url)?;

        debug!(
            resource = resources::MOVIES,
            query,
            count = movies.len(),
            "Movie search finished"
        );
        Ok(movies)
    }
}

fn record_cache_lookup(resource: &'static str, outcome: &'static str) {
    metrics::counter!(
        "resolver_cache_lookups_total",
        "resource" => resource,
        "outcome" => outcome
    )
    .increment(1);
}

fn record_store_write_failure(table: &'static str) {
    metrics::counter!("store_write_failures_total", "table" => table).increment(1);
}
