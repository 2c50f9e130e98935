use super::{GeocodeProvider, ProviderError, fetch_json, parse_base_url};
use crate::config::ProviderConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROVIDER: &str = "Google Geocoding";

/// Raw geocoding payload. Fields are optional so that a missing value is
/// reported by the normalizer instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeResponse {
    pub results: Option<Vec<GeocodeResult>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Clone)]
pub struct GoogleGeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocodeClient {
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl GeocodeProvider for GoogleGeocodeClient {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, ProviderError> {
        let mut url = parse_base_url(PROVIDER, &self.base_url)?;
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);

        debug!("Geocoding address: {}", address);

        let response: GeocodeResponse = fetch_json(PROVIDER, self.client.get(url)).await?;

        // Google reports auth and quota failures with HTTP 200 and an empty
        // result list; only OK and ZERO_RESULTS carry meaningful results.
        match response.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => Ok(response),
            Some(status) => Err(ProviderError::Rejected {
                provider: PROVIDER,
                reason: response
                    .error_message
                    .as_ref()
                    .map_or_else(|| status.to_string(), |msg| format!("{status}: {msg}")),
            }),
        }
    }
}
