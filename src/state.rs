use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::clients::wikipedia::WikipediaClient;
use crate::config::Config;
use crate::services::{
    ContentFetcher, ContentSource, RateGate, SpeciesLookupService, TitleResolver,
    WikipediaResolver,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    /// Process-wide gate; every resolver built from this state shares it.
    pub rate_gate: Arc<RateGate>,

    pub resolver: Arc<WikipediaResolver>,

    pub lookup_service: Arc<SpeciesLookupService>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let wikipedia = Arc::new(WikipediaClient::from_config(&config.wikipedia)?);
        Ok(Self::with_source(config, wikipedia))
    }

    /// Builds the state around an arbitrary content source, e.g. a stub in tests.
    pub fn with_source(config: Config, source: Arc<dyn ContentSource>) -> Self {
        let rate_gate = Arc::new(RateGate::new(config.wikipedia.min_interval()));

        let resolver = Arc::new(WikipediaResolver::new(
            source,
            rate_gate.clone(),
            config.wikipedia.qualifiers.clone(),
        ));

        let lookup_service = Arc::new(SpeciesLookupService::new(
            resolver.clone() as Arc<dyn TitleResolver>,
            resolver.clone() as Arc<dyn ContentFetcher>,
        ));

        info!(
            min_interval_ms = config.wikipedia.min_interval_ms,
            qualifiers = ?resolver.qualifiers(),
            "Species resolver initialized"
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            rate_gate,
            resolver,
            lookup_service,
        }
    }
}
