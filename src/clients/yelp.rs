use super::{BusinessSearchProvider, ProviderError, fetch_json, parse_base_url};
use crate::config::BusinessSearchConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROVIDER: &str = "Yelp";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BusinessSearchResponse {
    pub businesses: Option<Vec<YelpBusiness>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct YelpBusiness {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
    search_term: String,
}

impl YelpClient {
    #[must_use]
    pub fn new(config: &BusinessSearchConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &BusinessSearchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            search_term: config.search_term.clone(),
        }
    }
}

#[async_trait::async_trait]
impl BusinessSearchProvider for YelpClient {
    async fn search_businesses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<BusinessSearchResponse, ProviderError> {
        let mut url = parse_base_url(PROVIDER, &self.base_url)?;
        url.query_pairs_mut()
            .append_pair("term", &self.search_term)
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string());

        debug!(
            "Searching '{}' near {},{}",
            self.search_term, latitude, longitude
        );

        let request = self.client.get(url).bearer_auth(&self.api_key);
        fetch_json(PROVIDER, request).await
    }
}
