use super::{MovieSearchProvider, ProviderError, fetch_json, parse_base_url};
use crate::config::MovieSearchConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROVIDER: &str = "TMDB";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MovieSearchResponse {
    pub results: Option<Vec<TmdbMovie>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TmdbMovie {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(config: &MovieSearchConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &MovieSearchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl MovieSearchProvider for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<MovieSearchResponse, ProviderError> {
        let mut url = parse_base_url(PROVIDER, &self.base_url)?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", query);

        debug!("Searching movies for: {}", query);

        fetch_json(PROVIDER, self.client.get(url)).await
    }
}
