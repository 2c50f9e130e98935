//! Pure mappings from raw provider payloads to internal records.
//!
//! Nothing here performs I/O. A payload that lacks a required field yields
//! [`ResolveError::MalformedResponse`]; a well-formed geocode payload with no
//! results yields [`ResolveError::NotFound`].

use crate::clients::darksky::{self, ForecastResponse};
use crate::clients::google_geocode::{self, GeocodeResponse};
use crate::clients::tmdb::{self, MovieSearchResponse};
use crate::clients::yelp::{self, BusinessSearchResponse};
use crate::constants::{forecast::DATE_FORMAT, resources};
use crate::domain::{Coordinates, LocationId};
use crate::models::{Business, ForecastDay, Location, Movie};
use crate::services::resolver_service::ResolveError;
use chrono::DateTime;

/// Maps the first geocode result to a [`Location`] keyed by `search_query`.
pub fn location_from_geocode(
    search_query: &str,
    response: GeocodeResponse,
) -> Result<Location, ResolveError> {
    let malformed = |reason: &str| ResolveError::malformed(google_geocode::PROVIDER, reason);

    let results = response
        .results
        .ok_or_else(|| malformed("missing results array"))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::not_found(resources::LOCATION, search_query))?;

    let formatted_query = first
        .formatted_address
        .ok_or_else(|| malformed("first result has no formatted_address"))?;

    let point = first
        .geometry
        .and_then(|g| g.location)
        .ok_or_else(|| malformed("first result has no geometry.location"))?;

    let (Some(latitude), Some(longitude)) = (point.lat, point.lng) else {
        return Err(malformed("geometry.location is missing lat or lng"));
    };

    if !Coordinates::new(latitude, longitude).is_valid() {
        return Err(malformed(&format!(
            "coordinates out of range: {latitude},{longitude}"
        )));
    }

    Ok(Location {
        search_query: search_query.to_string(),
        formatted_query,
        latitude,
        longitude,
        id: None,
    })
}

/// Maps every daily entry, in provider order, to a [`ForecastDay`] for `location_id`.
pub fn forecast_from_darksky(
    response: ForecastResponse,
    location_id: LocationId,
) -> Result<Vec<ForecastDay>, ResolveError> {
    let entries = response
        .daily
        .and_then(|daily| daily.data)
        .ok_or_else(|| ResolveError::malformed(darksky::PROVIDER, "missing daily.data array"))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let malformed = |what: &str| {
                ResolveError::malformed(darksky::PROVIDER, &format!("daily entry {index} {what}"))
            };

            let forecast = entry.summary.ok_or_else(|| malformed("has no summary"))?;
            let epoch = entry.time.ok_or_else(|| malformed("has no time"))?;
            let time = forecast_date(epoch).ok_or_else(|| malformed("has an invalid time"))?;

            Ok(ForecastDay {
                forecast,
                time,
                location_id: Some(location_id),
            })
        })
        .collect()
}

/// Renders epoch seconds as a date-only string (UTC), e.g. `Mon Jan 01 2024`.
#[must_use]
pub fn forecast_date(epoch_seconds: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_seconds, 0).map(|dt| dt.format(DATE_FORMAT).to_string())
}

pub fn businesses_from_yelp(response: BusinessSearchResponse) -> Result<Vec<Business>, ResolveError> {
    let businesses = response
        .businesses
        .ok_or_else(|| ResolveError::malformed(yelp::PROVIDER, "missing businesses array"))?;

    businesses
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let name = raw.name.ok_or_else(|| {
                ResolveError::malformed(yelp::PROVIDER, &format!("business {index} has no name"))
            })?;

            Ok(Business {
                name,
                image_url: raw.image_url,
                price: raw.price,
                rating: raw.rating,
                url: raw.url,
            })
        })
        .collect()
}

pub fn movies_from_tmdb(
    response: MovieSearchResponse,
    image_base_url: &str,
) -> Result<Vec<Movie>, ResolveError> {
    let results = response
        .results
        .ok_or_else(|| ResolveError::malformed(tmdb::PROVIDER, "missing results array"))?;

    results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let title = raw.title.ok_or_else(|| {
                ResolveError::malformed(tmdb::PROVIDER, &format!("result {index} has no title"))
            })?;

            Ok(Movie {
                image_url: movie_image_url(image_base_url, raw.poster_path.as_deref()),
                title,
                overview: raw.overview,
                average_votes: raw.vote_average,
                total_votes: raw.vote_count,
                popularity: raw.popularity,
                released_on: raw.release_date,
            })
        })
        .collect()
}

/// `None` without a poster path, otherwise `image_base_url` + `poster_path`.
#[must_use]
pub fn movie_image_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| format!("{image_base_url}{path}"))
}
