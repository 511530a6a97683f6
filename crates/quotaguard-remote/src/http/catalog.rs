//! HTTP tier catalog.

use std::sync::Arc;

use async_trait::async_trait;

use quotaguard_core::error::ErrorKind;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::TierCatalog;
use quotaguard_core::types::TierDefinition;

use super::client::RemoteHttpClient;

/// [`TierCatalog`] over `GET {base}/tiers` and `GET {base}/tiers/{key}`.
#[derive(Debug, Clone)]
pub struct HttpTierCatalog {
    client: Arc<RemoteHttpClient>,
}

impl HttpTierCatalog {
    /// Create a catalog over a shared client.
    pub fn new(client: Arc<RemoteHttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TierCatalog for HttpTierCatalog {
    async fn get_tier(&self, key: &str) -> AppResult<Option<TierDefinition>> {
        self.client
            .get_json(&["tiers", key], ErrorKind::CatalogUnavailable)
            .await
    }

    async fn get_all_tiers(&self) -> AppResult<Vec<TierDefinition>> {
        Ok(self
            .client
            .get_json::<Vec<TierDefinition>>(&["tiers"], ErrorKind::CatalogUnavailable)
            .await?
            .unwrap_or_default())
    }
}
