use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::Providers;
use crate::config::Config;
use crate::db::{Store, StoreGateway};
use crate::services::{CachingResolverService, ResolverService};

/// Long-lived handles shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub resolver: Arc<dyn ResolverService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let providers = Providers::from_config(&config.providers)?;
        Self::with_providers(config, providers).await
    }

    /// Same as [`SharedState::new`] but with caller-supplied provider clients.
    pub async fn with_providers(config: Config, providers: Providers) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let gateway: Arc<dyn StoreGateway> = Arc::new(store.clone());
        let resolver = Arc::new(CachingResolverService::new(
            gateway,
            providers,
            config.providers.movies.image_base_url.clone(),
        )) as Arc<dyn ResolverService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            resolver,
        })
    }
}
