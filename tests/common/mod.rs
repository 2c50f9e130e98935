#![allow(dead_code)]

use cityscope::clients::{
    BusinessSearchProvider, BusinessSearchResponse, ForecastProvider, ForecastResponse,
    GeocodeProvider, GeocodeResponse, MovieSearchProvider, MovieSearchResponse, ProviderError,
    Providers,
};
use cityscope::db::{Lookup, Store, StoreGateway};
use cityscope::domain::LocationId;
use cityscope::models::{ForecastDay, Location};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub async fn memory_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("in-memory store")
}

/// Inserts a Seattle row directly so forecast rows have a parent.
pub async fn seed_location(store: &Store) -> LocationId {
    let location = Location {
        search_query: "Seattle, WA".to_string(),
        formatted_query: "Seattle, WA, USA".to_string(),
        latitude: 47.606_209,
        longitude: -122.332_071,
        id: None,
    };
    store
        .add_location(&location)
        .await
        .expect("seed location")
        .expect("fresh insert")
}

pub fn seattle_geocode() -> Value {
    json!({
        "status": "OK",
        "results": [ {
            "formatted_address": "Seattle, WA, USA",
            "geometry": { "location": { "lat": 47.606_209, "lng": -122.332_071 } }
        } ]
    })
}

/// Three days starting Mon Jan 01 2024 (UTC midnight).
pub fn three_day_forecast() -> Value {
    json!({
        "daily": { "data": [
            { "summary": "Light rain in the morning.", "time": 1_704_067_200 },
            { "summary": "Mostly cloudy throughout the day.", "time": 1_704_153_600 },
            { "summary": "Clear throughout the day.", "time": 1_704_240_000 }
        ] }
    })
}

pub fn deli_search() -> Value {
    json!({
        "businesses": [
            {
                "name": "Salumi",
                "image_url": "https://img.example/salumi.jpg",
                "price": "$$",
                "rating": 4.5,
                "url": "https://yelp.example/salumi"
            },
            { "name": "Bakeman's", "rating": 4.0 }
        ]
    })
}

pub fn movie_search() -> Value {
    json!({
        "results": [
            {
                "title": "Sleepless in Seattle",
                "overview": "A recently widowed man's son calls a radio talk-show.",
                "vote_average": 6.8,
                "vote_count": 1800,
                "poster_path": "/sleepless.jpg",
                "popularity": 12.3,
                "release_date": "1993-06-24"
            },
            { "title": "Untitled Seattle Project", "poster_path": null }
        ]
    })
}

/// Canned provider that counts calls and answers every request with the same
/// body, or with a rejection when built via [`StubProvider::failing`].
pub struct StubProvider {
    body: Value,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn ok(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body,
            failure: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Value::Null,
            failure: Some(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.failure {
            return Err(ProviderError::Rejected {
                provider: "stub",
                reason: reason.clone(),
            });
        }

        serde_json::from_value(self.body.clone())
            .map_err(|source| ProviderError::Decode {
                provider: "stub",
                source,
            })
    }
}

#[async_trait::async_trait]
impl GeocodeProvider for StubProvider {
    async fn geocode(&self, _address: &str) -> Result<GeocodeResponse, ProviderError> {
        self.respond()
    }
}

#[async_trait::async_trait]
impl ForecastProvider for StubProvider {
    async fn forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<ForecastResponse, ProviderError> {
        self.respond()
    }
}

#[async_trait::async_trait]
impl BusinessSearchProvider for StubProvider {
    async fn search_businesses(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<BusinessSearchResponse, ProviderError> {
        self.respond()
    }
}

#[async_trait::async_trait]
impl MovieSearchProvider for StubProvider {
    async fn search_movies(&self, _query: &str) -> Result<MovieSearchResponse, ProviderError> {
        self.respond()
    }
}

pub struct Stubs {
    pub geocode: Arc<StubProvider>,
    pub forecast: Arc<StubProvider>,
    pub businesses: Arc<StubProvider>,
    pub movies: Arc<StubProvider>,
}

impl Default for Stubs {
    fn default() -> Self {
        Self {
            geocode: StubProvider::ok(seattle_geocode()),
            forecast: StubProvider::ok(three_day_forecast()),
            businesses: StubProvider::ok(deli_search()),
            movies: StubProvider::ok(movie_search()),
        }
    }
}

impl Stubs {
    pub fn providers(&self) -> Providers {
        Providers {
            geocode: self.geocode.clone(),
            forecast: self.forecast.clone(),
            businesses: self.businesses.clone(),
            movies: self.movies.clone(),
        }
    }
}

/// Reads through to a real store; writes can be switched to fail, and the
/// next location lookup can be forced to miss.
///
/// `fail_forecast_write` fails only the nth forecast insert (1-based, 0 = off).
pub struct FlakyStore {
    pub inner: Store,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub hide_next_location: AtomicBool,
    pub fail_forecast_write: AtomicUsize,
    forecast_writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: Store) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            hide_next_location: AtomicBool::new(false),
            fail_forecast_write: AtomicUsize::new(0),
            forecast_writes: AtomicUsize::new(0),
        })
    }

    fn check(&self, flag: &AtomicBool, what: &str) -> anyhow::Result<()> {
        if flag.load(Ordering::SeqCst) {
            anyhow::bail!("simulated {what} failure");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StoreGateway for FlakyStore {
    async fn find_location(&self, search_query: &str) -> anyhow::Result<Lookup<Location>> {
        self.check(&self.fail_reads, "read")?;
        if self.hide_next_location.swap(false, Ordering::SeqCst) {
            return Ok(Lookup::Missing);
        }
        self.inner.find_location(search_query).await
    }

    async fn location_exists(&self, location_id: LocationId) -> anyhow::Result<bool> {
        self.check(&self.fail_reads, "read")?;
        self.inner.location_exists(location_id).await
    }

    async fn find_forecast(
        &self,
        location_id: LocationId,
    ) -> anyhow::Result<Lookup<Vec<ForecastDay>>> {
        self.check(&self.fail_reads, "read")?;
        self.inner.find_forecast(location_id).await
    }

    async fn insert_location(&self, location: &Location) -> anyhow::Result<Option<LocationId>> {
        self.check(&self.fail_writes, "write")?;
        self.inner.insert_location(location).await
    }

    async fn insert_forecast_day(
        &self,
        day: &ForecastDay,
        location_id: LocationId,
    ) -> anyhow::Result<()> {
        self.check(&self.fail_writes, "write")?;
        let attempt = self.forecast_writes.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_forecast_write.load(Ordering::SeqCst) {
            anyhow::bail!("simulated failure on forecast write {attempt}");
        }
        self.inner.insert_forecast_day(day, location_id).await
    }
}
