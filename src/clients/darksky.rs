use super::{ForecastProvider, ProviderError, fetch_json, parse_base_url};
use crate::config::ProviderConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROVIDER: &str = "Dark Sky";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForecastResponse {
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DailyBlock {
    pub data: Option<Vec<DailyEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DailyEntry {
    pub summary: Option<String>,
    /// Unix epoch seconds at local midnight of the forecast day.
    pub time: Option<i64>,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ForecastProvider for DarkSkyClient {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, ProviderError> {
        let mut url = parse_base_url(PROVIDER, &self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ProviderError::InvalidRequest {
                provider: PROVIDER,
                reason: format!("base url cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(&self.api_key)
            .push(&format!("{latitude},{longitude}"));

        debug!("Fetching forecast for {},{}", latitude, longitude);

        fetch_json(PROVIDER, self.client.get(url)).await
    }
}
