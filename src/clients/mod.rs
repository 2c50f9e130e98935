//! Outbound provider clients.
//!
//! Each provider sits behind a small trait so the resolver can be driven by
//! stubs in tests. The concrete clients issue exactly one HTTP request per
//! call and never retry; the shared reqwest client carries the timeout.

pub mod darksky;
pub mod google_geocode;
pub mod tmdb;
pub mod yelp;

use crate::config::ProvidersConfig;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

pub use darksky::{DarkSkyClient, ForecastResponse};
pub use google_geocode::{GeocodeResponse, GoogleGeocodeClient};
pub use tmdb::{MovieSearchResponse, TmdbClient};
pub use yelp::{BusinessSearchResponse, YelpClient};

/// Failure talking to a third-party provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} sent an undecodable body: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} rejected the request: {reason}")]
    Rejected {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} request could not be built: {reason}")]
    InvalidRequest {
        provider: &'static str,
        reason: String,
    },
}

impl ProviderError {
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Status { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Decode { provider, .. }
            | Self::Rejected { provider, .. }
            | Self::InvalidRequest { provider, .. } => provider,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

#[async_trait::async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, ProviderError>;
}

#[async_trait::async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn forecast(&self, latitude: f64, longitude: f64)
    -> Result<ForecastResponse, ProviderError>;
}

#[async_trait::async_trait]
pub trait BusinessSearchProvider: Send + Sync {
    async fn search_businesses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<BusinessSearchResponse, ProviderError>;
}

#[async_trait::async_trait]
pub trait MovieSearchProvider: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<MovieSearchResponse, ProviderError>;
}

/// The four provider seams the resolver depends on.
#[derive(Clone)]
pub struct Providers {
    pub geocode: Arc<dyn GeocodeProvider>,
    pub forecast: Arc<dyn ForecastProvider>,
    pub businesses: Arc<dyn BusinessSearchProvider>,
    pub movies: Arc<dyn MovieSearchProvider>,
}

impl Providers {
    /// Builds the production clients over one pooled HTTP client.
    pub fn from_config(config: &ProvidersConfig) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.request_timeout_seconds)?;

        Ok(Self {
            geocode: Arc::new(GoogleGeocodeClient::with_shared_client(
                http_client.clone(),
                &config.geocode,
            )),
            forecast: Arc::new(DarkSkyClient::with_shared_client(
                http_client.clone(),
                &config.forecast,
            )),
            businesses: Arc::new(YelpClient::with_shared_client(
                http_client.clone(),
                &config.businesses,
            )),
            movies: Arc::new(TmdbClient::with_shared_client(http_client, &config.movies)),
        })
    }
}

/// Build a shared HTTP client for all providers.
/// Reusing one client keeps connection pooling across providers.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds))
        .user_agent(crate::constants::providers::USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Sends `request` once and decodes a JSON body on success.
async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let start = Instant::now();
    let result = send_and_decode(provider, request).await;

    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.is_timeout() => "timeout",
        Err(_) => "error",
    };

    metrics::counter!(
        "provider_requests_total",
        "provider" => provider,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("provider_request_duration_seconds", "provider" => provider)
        .record(start.elapsed().as_secs_f64());

    debug!(
        provider,
        outcome,
        elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Provider call finished"
    );

    result
}

async fn send_and_decode<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    serde_json::from_str(&body).map_err(|source| ProviderError::Decode { provider, source })
}

fn parse_base_url(provider: &'static str, base_url: &str) -> Result<url::Url, ProviderError> {
    url::Url::parse(base_url).map_err(|e| ProviderError::InvalidRequest {
        provider,
        reason: format!("invalid base url {base_url}: {e}"),
    })
}
