//! Shared, immutable handler state.

use std::sync::Arc;
use tagwatch_rs_config::ServiceConfig;
use tagwatch_rs_core::{
    AzureConnector, BlobPersister, ConnectionStringSource, QuestionFetcher, StackExchangeClient,
    build_http_client,
};

/// Handles used by the route handlers. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: QuestionFetcher,
    pub persister: BlobPersister,
}

impl AppState {
    pub fn new(fetcher: QuestionFetcher, persister: BlobPersister) -> Self {
        Self { fetcher, persister }
    }

    /// Build the production state: Stack Exchange for questions, Azure for
    /// blobs, both sharing one pooled HTTP client.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let http = build_http_client(&config.http)?;
        let source = StackExchangeClient::new(http.clone(), &config.questions);
        let connector = AzureConnector::new(
            http,
            ConnectionStringSource::Env(config.storage.connection_string_env.clone()),
        );
        let persister = BlobPersister::new(Arc::new(connector), config.storage.container.clone())
            .with_strict_container_create(config.storage.strict_container_create);
        Ok(Self::new(QuestionFetcher::new(Arc::new(source)), persister))
    }
}
