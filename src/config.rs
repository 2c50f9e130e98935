use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cityscope.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Upper bound for a single outbound provider call, connect included.
    pub request_timeout_seconds: u64,

    pub geocode: ProviderConfig,

    pub forecast: ProviderConfig,

    pub businesses: BusinessSearchConfig,

    pub movies: MovieSearchConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            geocode: ProviderConfig {
                base_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
                api_key: String::new(),
            },
            forecast: ProviderConfig {
                base_url: "https://api.darksky.net/forecast".to_string(),
                api_key: String::new(),
            },
            businesses: BusinessSearchConfig::default(),
            movies: MovieSearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,

    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessSearchConfig {
    pub base_url: String,

    /// Sent as a bearer token.
    pub api_key: String,

    /// Fixed search term sent with every lookup.
    pub search_term: String,
}

impl Default for BusinessSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.yelp.com/v3/businesses/search".to_string(),
            api_key: String::new(),
            search_term: crate::constants::providers::DEFAULT_BUSINESS_TERM.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieSearchConfig {
    pub base_url: String,

    pub api_key: String,

    /// Prefix joined with a poster path to build `image_url`.
    pub image_base_url: String,
}

impl Default for MovieSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3/search/movie".to_string(),
            api_key: String::new(),
            image_base_url: crate::constants::providers::MOVIE_IMAGE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "cityscope".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays deployment variables (usually from `.env`) on top of the file
    /// values. `lookup` is `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(url) = non_empty("DATABASE_URL") {
            self.general.database_path = url;
        }

        if let Some(level) = non_empty("LOG_LEVEL") {
            self.general.log_level = level;
        }

        if let Some(key) = non_empty("GEOCODE_API_KEY") {
            self.providers.geocode.api_key = key;
        }

        if let Some(key) = non_empty("DARKSKY_API_KEY").or_else(|| non_empty("WEATHER_API_KEY")) {
            self.providers.forecast.api_key = key;
        }

        if let Some(key) = non_empty("YELP_API_KEY") {
            self.providers.businesses.api_key = key;
        }

        if let Some(key) = non_empty("MOVIE_API_KEY") {
            self.providers.movies.api_key = key;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cityscope").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cityscope").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.enabled && self.server.port == 0 {
            anyhow::bail!("Server port must be > 0 when the server is enabled");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("providers.request_timeout_seconds must be > 0");
        }

        if !self.general.database_path.starts_with("sqlite:") {
            let scheme = self
                .general
                .database_path
                .split_once(':')
                .map_or("none", |(scheme, _)| scheme);
            anyhow::bail!(
                "general.database_path must be a sqlite: URL (got scheme '{scheme}')"
            );
        }

        let endpoints = [
            ("geocode", &self.providers.geocode.base_url),
            ("forecast", &self.providers.forecast.base_url),
            ("businesses", &self.providers.businesses.base_url),
            ("movies", &self.providers.movies.base_url),
        ];

        for (name, base_url) in endpoints {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid {name} base_url: {base_url}"))?;
        }

        let keys = [
            ("GEOCODE_API_KEY", &self.providers.geocode.api_key),
            ("DARKSKY_API_KEY", &self.providers.forecast.api_key),
            ("YELP_API_KEY", &self.providers.businesses.api_key),
            ("MOVIE_API_KEY", &self.providers.movies.api_key),
        ];

        for (var, key) in keys {
            if key.is_empty() {
                warn!("{} is not set; calls to that provider will fail upstream", var);
            }
        }

        Ok(())
    }
}
